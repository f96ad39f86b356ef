//! Error types for protogen.
//!
//! This module provides one error hierarchy with contextual information,
//! shared by every crate in the workspace.
//!
//! # Examples
//!
//! ```
//! use protogen_core::{Error, Result};
//!
//! fn check_destination(dir: &str) -> Result<()> {
//!     if dir.is_empty() {
//!         return Err(Error::Config {
//!             message: "destination must not be empty".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = check_destination("").unwrap_err();
//! assert!(err.is_config_error());
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for protogen.
///
/// All errors in the system use this type, providing consistent error
/// handling across all crates in the workspace. Every error is terminal for
/// the current generation run; nothing recovers locally.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    ///
    /// Raised when required inputs are missing or empty, or when an
    /// argument template is malformed. Detected eagerly at construction,
    /// never at plan time.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// Filesystem or process I/O error.
    ///
    /// Occurs when the source tree cannot be traversed, an output
    /// directory cannot be created, a generated file cannot be written, or
    /// a compiler binary cannot be spawned.
    #[error("I/O error on '{}'", path.display())]
    Io {
        /// Path the failing operation was applied to
        path: PathBuf,
        /// Underlying I/O error cause
        #[source]
        source: std::io::Error,
    },

    /// Aggregation template error.
    ///
    /// Raised when the template for a generated artifact fails to parse or
    /// render; carries the template engine's message.
    #[error("Template error: {message}")]
    Template {
        /// The template engine's failure message
        message: String,
    },

    /// An invoked compiler exited with a non-zero status.
    ///
    /// Carries the canonical command line and the combined stdout/stderr of
    /// the failed process so callers can show the compiler's own diagnostics.
    #[error("Command failed: {command}")]
    CommandFailed {
        /// Canonical command line of the failed invocation
        command: String,
        /// Combined stdout and stderr captured from the process
        output: String,
    },

    /// An invoked compiler exceeded its timeout.
    #[error("Command timed out after {duration_secs}s: {command}")]
    Timeout {
        /// Canonical command line of the invocation that timed out
        command: String,
        /// Duration in seconds before the timeout fired
        duration_secs: u64,
    },
}

impl Error {
    /// Returns `true` if this is a configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use protogen_core::Error;
    ///
    /// let err = Error::Config {
    ///     message: "source must not be empty".to_string(),
    /// };
    /// assert!(err.is_config_error());
    /// ```
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::Config { .. })
    }

    /// Returns `true` if this is an I/O error.
    ///
    /// # Examples
    ///
    /// ```
    /// use protogen_core::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::Io {
    ///     path: PathBuf::from("pbf"),
    ///     source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
    /// };
    /// assert!(err.is_io_error());
    /// ```
    #[must_use]
    pub const fn is_io_error(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Returns `true` if this is a template error.
    ///
    /// # Examples
    ///
    /// ```
    /// use protogen_core::Error;
    ///
    /// let err = Error::Template {
    ///     message: "unclosed block".to_string(),
    /// };
    /// assert!(err.is_template_error());
    /// ```
    #[must_use]
    pub const fn is_template_error(&self) -> bool {
        matches!(self, Self::Template { .. })
    }

    /// Returns `true` if this is a failed compiler invocation.
    ///
    /// # Examples
    ///
    /// ```
    /// use protogen_core::Error;
    ///
    /// let err = Error::CommandFailed {
    ///     command: "protoc --go_out=pkg/ a.proto".to_string(),
    ///     output: "a.proto: file not found".to_string(),
    /// };
    /// assert!(err.is_command_failure());
    /// ```
    #[must_use]
    pub const fn is_command_failure(&self) -> bool {
        matches!(self, Self::CommandFailed { .. })
    }

    /// Returns `true` if this is a timeout error.
    ///
    /// # Examples
    ///
    /// ```
    /// use protogen_core::Error;
    ///
    /// let err = Error::Timeout {
    ///     command: "protoc --go_out=pkg/ a.proto".to_string(),
    ///     duration_secs: 300,
    /// };
    /// assert!(err.is_timeout());
    /// ```
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Result type alias for protogen operations.
///
/// This is a convenience alias for `Result<T, Error>` used throughout
/// the codebase.
///
/// # Examples
///
/// ```
/// use protogen_core::{Error, Result};
///
/// fn validate_timeout(secs: u64) -> Result<u64> {
///     if secs == 0 {
///         return Err(Error::Config {
///             message: "timeout must be positive".to_string(),
///         });
///     }
///     Ok(secs)
/// }
///
/// assert!(validate_timeout(300).is_ok());
/// assert!(validate_timeout(0).is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;
