//! HTML tokenizer and tree constructor for the wombat parser core.
//!
//! # Scope
//!
//! This crate implements:
//! - **HTML Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - Data, RCDATA, RAWTEXT, script data, and PLAINTEXT content states
//!   - Tag, attribute, comment, DOCTYPE, and bogus-comment handling
//!   - Per-character streaming `step()` with an explicit reconsume contract
//! - **Tree Constructor** ([WHATWG § 13.2.6](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction))
//!   - Stack of open elements over an arena document tree
//!   - Void elements, display-suppressed subtrees, head/form pointers
//! - **Driver** - the per-parse [`ParserRun`] owning the tokenizer/builder
//!   pair, with [`parse`] as the whole-string entry point
//!
//! # Deliberate simplifications
//!
//! - Character references: the `&` is consumed and control returns to the
//!   originating state; no entity table, no numeric decoding
//! - Script data escape states (`<!--` inside scripts) are passed through
//! - DOCTYPE public/system identifiers are consumed without being recorded
//! - Comments are tokenized but produce no tree nodes

/// The per-parse driving loop and public entry point.
pub mod driver;
/// Error and diagnostic types.
pub mod error;
/// HTML tree construction.
pub mod parser;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

pub use driver::{parse, ParseOutcome, ParserRun};
pub use error::{ContractViolation, ParseError, Position};
pub use parser::{print_tree, InsertionMode, TreeBuilder};
pub use tokenizer::{Attribute, Token, Tokenizer, TokenizerState};
