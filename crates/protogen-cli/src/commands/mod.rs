//! Command implementations for the protogen CLI.
//!
//! Each command module parses its arguments, executes the operation, and
//! formats output according to the requested format.

pub mod completions;
pub mod generate;
