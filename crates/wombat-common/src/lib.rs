//! Common utilities for the wombat HTML parser.
//!
//! This crate provides shared infrastructure used by the parser components:
//! - **Warning System** - colored terminal output for recoverable parse errors

pub mod warning;
