//! Core value types and errors for protogen.
//!
//! This crate provides the foundational types shared by the generation
//! pipeline and the command line interface.
//!
//! # Architecture
//!
//! The core consists of:
//! - The plan model (`Invocation`, `OutputFile`) produced by the generation
//!   pipeline and consumed by the executor
//! - The error hierarchy with contextual information
//! - CLI value types (`ExitCode`, `OutputFormat`)

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod error;
mod plan;

pub mod cli;

pub use error::{Error, Result};
pub use plan::{Invocation, OutputFile};
