//! Compiler process execution and output file writing.
//!
//! Runs planned invocations sequentially with a per-invocation timeout and
//! writes aggregation files, creating parent directories as needed. The
//! process working directory is never changed; planned paths are passed to
//! the compiler as is.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use protogen_core::{Error, Invocation, OutputFile, Result};
use tokio::process::Command;
use tracing::{debug, info};

/// Runs every invocation in order, stopping at the first failure.
///
/// The invocation's output directory is created before the compiler runs
/// so its plugins have somewhere to write.
///
/// # Errors
///
/// Returns [`Error::Io`] when the output directory cannot be created or
/// the compiler binary cannot be spawned, [`Error::Timeout`] when an
/// invocation exceeds `timeout_secs`, and [`Error::CommandFailed`] when
/// the compiler exits non-zero. The failed compiler's stdout and stderr
/// are carried in the error.
pub async fn execute(invocations: &[Invocation], timeout_secs: u64) -> Result<()> {
    let limit = Duration::from_secs(timeout_secs);

    for invocation in invocations {
        std::fs::create_dir_all(&invocation.directory).map_err(|source| Error::Io {
            path: invocation.directory.clone(),
            source,
        })?;

        let command_line = invocation.command_line();
        info!(command = %command_line, "running schema compiler");

        let mut command = Command::new(&invocation.binary);
        command
            .args(&invocation.arguments)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(limit, command.output()).await {
            Ok(spawned) => spawned.map_err(|source| Error::Io {
                path: PathBuf::from(&invocation.binary),
                source,
            })?,
            Err(_) => {
                return Err(Error::Timeout {
                    command: command_line,
                    duration_secs: timeout_secs,
                });
            }
        };

        if !output.status.success() {
            return Err(Error::CommandFailed {
                command: command_line,
                output: combined_output(&output.stdout, &output.stderr),
            });
        }

        debug!(command = %command_line, "schema compiler finished");
    }

    Ok(())
}

/// Concatenates captured stdout and stderr, stdout first.
fn combined_output(stdout: &[u8], stderr: &[u8]) -> String {
    let mut combined = String::from_utf8_lossy(stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(stderr));
    combined
}

/// Writes rendered aggregation files, creating parent directories first.
/// Existing files are overwritten.
///
/// # Errors
///
/// Returns [`Error::Io`] when a directory or file cannot be written.
pub fn write(files: &[OutputFile]) -> Result<()> {
    for file in files {
        if let Some(parent) = file.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| Error::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        std::fs::write(&file.path, &file.contents).map_err(|source| Error::Io {
            path: file.path.clone(),
            source,
        })?;

        info!(path = %file.path.display(), bytes = file.contents.len(), "wrote aggregation file");
    }

    Ok(())
}
