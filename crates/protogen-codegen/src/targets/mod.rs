//! Built-in generation targets.
//!
//! A target pairs a planner configuration (compiler binary plus argument
//! templates) with the aggregation files the language needs. All built-in
//! targets invoke `protoc`; they differ in the plugin arguments and in
//! whether an aggregation file is rendered.

mod golang;
mod typescript;

pub use golang::Golang;
pub use typescript::Typescript;

use std::path::PathBuf;

use protogen_core::{Invocation, OutputFile, Result};

use crate::scanner::DirectoryGroups;

/// Configuration shared by the built-in targets.
#[derive(Debug, Clone)]
pub struct TargetConfig {
    /// Root the schema tree is scanned from.
    pub source: PathBuf,
    /// Root directory generated code goes into.
    pub destination: PathBuf,
}

/// A language generation target.
///
/// Implementations turn scanned directory groups into compiler invocations
/// and, where the language needs one, rendered aggregation files.
pub trait Target: std::fmt::Debug {
    /// Builds the compiler invocations for the scanned groups.
    ///
    /// # Errors
    ///
    /// Built-in targets plan infallibly; the `Result` leaves room for
    /// targets that consult external state.
    fn invocations(&self, groups: &DirectoryGroups) -> Result<Vec<Invocation>>;

    /// Renders the aggregation files for the scanned groups.
    ///
    /// Targets without aggregation files return an empty list.
    ///
    /// # Errors
    ///
    /// Returns a template error when an aggregation file fails to render.
    fn files(&self, groups: &DirectoryGroups) -> Result<Vec<OutputFile>>;
}
