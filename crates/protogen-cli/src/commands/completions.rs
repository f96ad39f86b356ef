//! Shell completion generation command.
//!
//! Generates shell completion scripts for bash, zsh, fish, and `PowerShell`.

use anyhow::Result;
use clap::Command;
use clap_complete::{Shell, generate};
use protogen_core::cli::ExitCode;
use std::io;
use tracing::info;

/// Generates a shell completion script for the specified shell.
///
/// Prints the completion script to stdout, which can be sourced or saved
/// to the appropriate location for the shell.
pub fn generate_completions(shell: Shell, cmd: &mut Command) {
    generate(shell, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

/// Runs the completions command.
///
/// # Examples
///
/// ```no_run
/// use protogen_cli::commands::completions;
/// use clap::Command;
/// use clap_complete::Shell;
///
/// # #[tokio::main]
/// # async fn main() {
/// let mut cmd = Command::new("protogen");
/// let result = completions::run(Shell::Bash, &mut cmd).await;
/// assert!(result.is_ok());
/// # }
/// ```
pub async fn run(shell: Shell, cmd: &mut Command) -> Result<ExitCode> {
    info!("generating completions for shell: {shell}");
    generate_completions(shell, cmd);
    Ok(ExitCode::SUCCESS)
}
