//! CLI-specific types and utilities.
//!
//! This module provides strong types for CLI concepts, keeping raw strings
//! and integers out of the command line layer.
//!
//! # Examples
//!
//! ```
//! use protogen_core::cli::{ExitCode, OutputFormat};
//!
//! // Output format selection
//! let format = OutputFormat::Pretty;
//! assert_eq!(format.as_str(), "pretty");
//!
//! // Exit codes with semantic meaning
//! let code = ExitCode::SUCCESS;
//! assert_eq!(code.as_i32(), 0);
//! ```

use std::fmt;
use std::str::FromStr;

/// CLI output format.
///
/// Determines how the run summary and the dry-run plan are formatted.
/// All formats provide the same information with different presentation.
///
/// # Examples
///
/// ```
/// use protogen_core::cli::OutputFormat;
///
/// let format = OutputFormat::Json;
/// assert_eq!(format.as_str(), "json");
///
/// let format: OutputFormat = "pretty".parse().unwrap();
/// assert_eq!(format, OutputFormat::Pretty);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// JSON output for machine parsing
    Json,
    /// Plain text output for scripts
    Text,
    /// Pretty-printed output with colors for human reading
    #[default]
    Pretty,
}

impl OutputFormat {
    /// Returns the string representation of the format.
    ///
    /// # Examples
    ///
    /// ```
    /// use protogen_core::cli::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::Json.as_str(), "json");
    /// assert_eq!(OutputFormat::Text.as_str(), "text");
    /// assert_eq!(OutputFormat::Pretty.as_str(), "pretty");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
            Self::Pretty => "pretty",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            "pretty" => Ok(Self::Pretty),
            _ => Err(crate::Error::Config {
                message: format!("invalid output format: '{s}' (expected: json, text, or pretty)"),
            }),
        }
    }
}

/// CLI exit code with semantic meaning.
///
/// Provides type-safe exit codes following Unix conventions.
/// Success is 0, errors are non-zero with specific meanings.
///
/// # Examples
///
/// ```
/// use protogen_core::cli::ExitCode;
///
/// let code = ExitCode::SUCCESS;
/// assert_eq!(code.as_i32(), 0);
/// assert!(code.is_success());
///
/// let code = ExitCode::from_i32(1);
/// assert!(!code.is_success());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Successful execution (exit code 0).
    pub const SUCCESS: Self = Self(0);

    /// General error (exit code 1).
    pub const ERROR: Self = Self(1);

    /// Invalid input or arguments (exit code 2).
    pub const INVALID_INPUT: Self = Self(2);

    /// An invoked compiler reported failure (exit code 3).
    pub const COMPILER_FAILURE: Self = Self(3);

    /// An invoked compiler exceeded its timeout (exit code 4).
    pub const TIMEOUT: Self = Self(4);

    /// Creates an exit code from an integer value.
    ///
    /// # Examples
    ///
    /// ```
    /// use protogen_core::cli::ExitCode;
    ///
    /// let code = ExitCode::from_i32(0);
    /// assert_eq!(code, ExitCode::SUCCESS);
    /// ```
    #[must_use]
    pub const fn from_i32(code: i32) -> Self {
        Self(code)
    }

    /// Maps an error to the exit code its failure class reports.
    ///
    /// # Examples
    ///
    /// ```
    /// use protogen_core::cli::ExitCode;
    /// use protogen_core::Error;
    ///
    /// let err = Error::Config {
    ///     message: "source must not be empty".to_string(),
    /// };
    /// assert_eq!(ExitCode::from_error(&err), ExitCode::INVALID_INPUT);
    /// ```
    #[must_use]
    pub const fn from_error(error: &crate::Error) -> Self {
        match error {
            crate::Error::Config { .. } => Self::INVALID_INPUT,
            crate::Error::Io { .. } | crate::Error::Template { .. } => Self::ERROR,
            crate::Error::CommandFailed { .. } => Self::COMPILER_FAILURE,
            crate::Error::Timeout { .. } => Self::TIMEOUT,
        }
    }

    /// Returns the exit code as an integer.
    ///
    /// # Examples
    ///
    /// ```
    /// use protogen_core::cli::ExitCode;
    ///
    /// assert_eq!(ExitCode::SUCCESS.as_i32(), 0);
    /// assert_eq!(ExitCode::ERROR.as_i32(), 1);
    /// ```
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }

    /// Checks if the exit code represents success.
    ///
    /// # Examples
    ///
    /// ```
    /// use protogen_core::cli::ExitCode;
    ///
    /// assert!(ExitCode::SUCCESS.is_success());
    /// assert!(!ExitCode::ERROR.is_success());
    /// ```
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.0 == 0
    }
}

impl Default for ExitCode {
    fn default() -> Self {
        Self::SUCCESS
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
