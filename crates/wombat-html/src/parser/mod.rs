//! HTML tree construction module.
//!
//! Implements a reduced form of
//! [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction):
//! an insertion-mode state variable and a stack of open elements building an
//! arena document tree.

/// Tree constructor implementation.
pub mod core;

pub use core::{print_tree, InsertionMode, TreeBuilder};
