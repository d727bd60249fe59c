//! HTML tokenizer module.
//!
//! Implements a subset of
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! of the WHATWG HTML Living Standard as a per-character streaming state
//! machine.

/// Character reference handling per § 13.2.5.72 (simplified, no entity table).
pub mod character_reference;
/// HTML tokenizer state machine implementation.
pub mod core;
/// Helper methods for state transitions, emission, and attributes.
pub mod helpers;
/// Token types produced by the tokenizer.
pub mod token;

pub use core::{Tokenizer, TokenizerState};
pub use token::{Attribute, Token};
