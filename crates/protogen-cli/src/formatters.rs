//! Output formatters for CLI commands.
//!
//! Provides consistent formatting across all CLI commands for JSON, text,
//! and pretty output modes.

use anyhow::Result;
use colored::Colorize;
use protogen_core::cli::OutputFormat;
use serde::Serialize;

/// Format data according to the specified output format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Examples
///
/// ```
/// use protogen_cli::formatters::format_output;
/// use protogen_core::cli::OutputFormat;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Summary {
///     target: String,
///     invocations: usize,
/// }
///
/// let summary = Summary {
///     target: "golang".to_string(),
///     invocations: 2,
/// };
///
/// let output = format_output(&summary, OutputFormat::Json)?;
/// assert!(output.contains("\"target\""));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(data),
        OutputFormat::Text => text::format(data),
        OutputFormat::Pretty => pretty::format(data),
    }
}

/// JSON output formatting.
pub mod json {
    use super::{Result, Serialize};

    /// Format data as pretty-printed JSON.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let json = serde_json::to_string_pretty(data)?;
        Ok(json)
    }

    /// Format data as compact JSON (no formatting).
    pub fn format_compact<T: Serialize>(data: &T) -> Result<String> {
        let json = serde_json::to_string(data)?;
        Ok(json)
    }
}

/// Plain text output formatting.
pub mod text {
    use super::{Result, Serialize, json};

    /// Format data as a single line of compact JSON.
    ///
    /// Suitable for piping to other commands or scripts.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        json::format_compact(data)
    }
}

/// Pretty (human-readable) output formatting.
pub mod pretty {
    use super::{Colorize, Result, Serialize};
    use serde_json::Value;

    /// Format data as colorized `key: value` lines.
    ///
    /// Nested objects and arrays indent by two spaces per level.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let mut out = String::new();
        append_value(&mut out, &value, 0);
        Ok(out.trim_end().to_string())
    }

    fn append_value(out: &mut String, value: &Value, indent: usize) {
        let pad = "  ".repeat(indent);

        match value {
            Value::Object(map) => {
                for (key, nested) in map {
                    if is_scalar(nested) {
                        out.push_str(&format!("{pad}{}: {}\n", key.blue().bold(), scalar(nested)));
                    } else {
                        out.push_str(&format!("{pad}{}:\n", key.blue().bold()));
                        append_value(out, nested, indent + 1);
                    }
                }
            }
            Value::Array(items) => {
                for item in items {
                    if is_scalar(item) {
                        out.push_str(&format!("{pad}- {}\n", scalar(item)));
                    } else {
                        out.push_str(&format!("{pad}-\n"));
                        append_value(out, item, indent + 1);
                    }
                }
            }
            other => out.push_str(&format!("{pad}{}\n", scalar(other))),
        }
    }

    const fn is_scalar(value: &Value) -> bool {
        !matches!(value, Value::Object(_) | Value::Array(_))
    }

    fn scalar(value: &Value) -> String {
        match value {
            Value::Null => "null".dimmed().to_string(),
            Value::Bool(flag) => flag.to_string().yellow().to_string(),
            Value::Number(number) => number.to_string().cyan().to_string(),
            Value::String(text) => text.green().to_string(),
            Value::Array(_) | Value::Object(_) => value.to_string(),
        }
    }
}
