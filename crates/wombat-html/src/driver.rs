//! The per-parse driving loop.
//!
//! [`ParserRun`] owns exactly one tokenizer, one tree builder, and one error
//! list for the duration of a single parse; nothing is shared between runs
//! and nothing is process-global. The loop enforces two contracts:
//!
//! - Strict interleaving: every token emitted for character N reaches the
//!   tree builder before character N+1 is stepped.
//! - The reconsume loop: when a state says "reconsume", the same character is
//!   replayed through [`crate::tokenizer::Tokenizer::step`] until the flag
//!   stays clear - a character can be reconsumed through several states in a
//!   row.

use wombat_dom::DomTree;

use crate::error::{ContractViolation, ParseError, Position};
use crate::parser::TreeBuilder;
use crate::tokenizer::Tokenizer;

/// Result of a completed parse: the document tree plus every recoverable
/// parse error recorded along the way, in input order.
pub struct ParseOutcome {
    /// The constructed document tree.
    pub tree: DomTree,
    /// Recoverable parse errors; advisory, never fatal.
    pub errors: Vec<ParseError>,
}

/// One parse in flight: tokenizer, tree builder, cursor, and error list.
///
/// Most callers want [`parse`]; the run type is public so that streaming
/// callers can feed characters as they arrive.
pub struct ParserRun {
    tokenizer: Tokenizer,
    builder: TreeBuilder,
    position: Position,
    errors: Vec<ParseError>,
}

impl ParserRun {
    /// Start a fresh run.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            builder: TreeBuilder::new(),
            position: Position::default(),
            errors: Vec::new(),
        }
    }

    /// Feed one character of input.
    ///
    /// # Errors
    ///
    /// Propagates a [`ContractViolation`] if the run is driven past its
    /// end-of-input sentinel. Malformed markup never errors here.
    pub fn feed(&mut self, c: char) -> Result<(), ContractViolation> {
        self.pump(Some(c))?;

        // The cursor advances after the character is fully processed, so
        // errors recorded during its reconsume loop all point at it.
        if c == '\n' {
            self.position.row += 1;
            self.position.column = 0;
        } else {
            self.position.column += 1;
        }
        Ok(())
    }

    /// Feed a whole string of input.
    ///
    /// # Errors
    ///
    /// Propagates a [`ContractViolation`] from [`ParserRun::feed`].
    pub fn feed_str(&mut self, input: &str) -> Result<(), ContractViolation> {
        for c in input.chars() {
            self.feed(c)?;
        }
        Ok(())
    }

    /// Signal end of input and finish the run.
    ///
    /// # Errors
    ///
    /// Propagates a [`ContractViolation`] if the run was already finished.
    pub fn finish(mut self) -> Result<ParseOutcome, ContractViolation> {
        self.pump(None)?;
        Ok(ParseOutcome {
            tree: self.builder.into_tree(),
            errors: self.errors,
        })
    }

    /// Run one input character (or the end-of-input sentinel) through the
    /// tokenizer, replaying it while the reconsume flag is set, and hand
    /// every emitted token to the tree builder before returning.
    fn pump(&mut self, input: Option<char>) -> Result<(), ContractViolation> {
        loop {
            self.tokenizer.step(input, self.position)?;
            self.drain()?;
            if !self.tokenizer.take_reconsume() {
                break;
            }
        }
        Ok(())
    }

    /// Move pending tokens into the tree builder and collect errors from
    /// both halves, preserving input order.
    fn drain(&mut self) -> Result<(), ContractViolation> {
        self.errors.append(&mut self.tokenizer.drain_errors());
        while let Some(token) = self.tokenizer.next_token() {
            self.builder.process_token(&token, self.position)?;
            self.errors.append(&mut self.builder.drain_errors());
        }
        Ok(())
    }
}

impl Default for ParserRun {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a complete input string into a document tree.
///
/// Recoverable parse errors are collected on the returned
/// [`ParseOutcome`], never surfaced as `Err`.
///
/// # Errors
///
/// A [`ContractViolation`] indicates a bug in the driving code, not in the
/// input; with this whole-string entry point it should be unreachable.
pub fn parse(input: &str) -> Result<ParseOutcome, ContractViolation> {
    let mut run = ParserRun::new();
    run.feed_str(input)?;
    run.finish()
}
