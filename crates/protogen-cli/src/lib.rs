//! Protogen CLI library.
//!
//! Exposes the command implementations, the compiler process executor, and
//! the output formatters so integration tests can drive them directly.

#![allow(clippy::format_push_string)]
#![allow(clippy::unused_async)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::unnecessary_wraps)]

pub mod commands;
pub mod executor;
pub mod formatters;
