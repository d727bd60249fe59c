//! Error and diagnostic types for the parser core.
//!
//! Two disjoint error classes exist:
//!
//! 1. [`ParseError`] - recoverable, advisory reports about malformed markup.
//!    The parser always continues via a documented recovery transition.
//! 2. [`ContractViolation`] - fatal precondition failures that indicate a bug
//!    in the caller (driving a finished state machine), never bad input.

use core::fmt;

use thiserror::Error;

/// A row/column cursor into the input, maintained by the driving loop.
///
/// Rows and columns are zero-based; the column resets on every line feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Zero-based line number.
    pub row: usize,
    /// Zero-based column within the current line.
    pub column: usize,
}

/// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
///
/// A recoverable parse error: malformed markup the tokenizer or tree
/// constructor recovered from. Purely advisory - collecting or logging these
/// never alters control flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Zero-based line where the error was detected.
    pub row: usize,
    /// Zero-based column where the error was detected.
    pub column: usize,
    /// Description of the error per the spec's error definitions.
    pub message: String,
}

impl ParseError {
    /// Create a parse error at the given position.
    #[must_use]
    pub fn new(position: Position, message: impl Into<String>) -> Self {
        Self {
            row: position.row,
            column: position.column,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at line:{}, col:{}",
            self.message, self.row, self.column
        )
    }
}

/// A precondition failure in the driving code.
///
/// These signal caller bugs, not bad input: malformed markup never produces
/// one of these. They are a distinct kind from [`ParseError`] on purpose -
/// recoverable errors are values on the run, contract violations are `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContractViolation {
    /// The tokenizer was stepped again after it consumed the end-of-input
    /// sentinel and emitted its end-of-file token.
    #[error("tokenizer stepped after the end-of-input sentinel")]
    StepAfterEndOfInput,

    /// The tree constructor was handed a token after it accepted an
    /// end-of-file token.
    #[error("tree constructor received a token after end-of-file")]
    TokenAfterEndOfFile,
}
