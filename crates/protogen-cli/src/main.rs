//! Protocol buffer code generation orchestrator.
#![allow(clippy::format_push_string)]
#![allow(clippy::unused_async)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::unnecessary_wraps)]
//!
//! Command-line interface that scans a schema tree, plans one compiler
//! invocation per schema directory and argument template, then runs the
//! compiler and writes the target's aggregation files.
//!
//! # Architecture
//!
//! The CLI is organized around subcommands:
//! - `generate` - Scan for `.proto` schemas and run the compiler per directory
//! - `completions` - Generate shell completions
//!
//! # Examples
//!
//! ```bash
//! # Compile every schema directory for Go
//! protogen generate golang
//!
//! # TypeScript bindings from a dedicated schema tree
//! protogen generate typescript -s ./pbf/ -d ./src/pb/
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use protogen_core::cli::{ExitCode, OutputFormat};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod executor;
mod formatters;

use commands::generate::TargetKind;

/// Protogen - protocol buffer compilation, one command per schema directory.
///
/// Scans a source tree for `.proto` files, derives a deterministic compiler
/// plan from per-target argument templates, and runs it.
#[derive(Parser, Debug)]
#[command(name = "protogen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (json, text, pretty)
    #[arg(long = "format", global = true, default_value = "pretty")]
    format: String,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate code from protocol buffer schemas.
    ///
    /// Scans the source tree for `.proto` files, groups them by containing
    /// directory, and runs the schema compiler once per directory and
    /// argument template. The typescript target additionally writes an
    /// `index.ts` aggregation file beneath the destination.
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Go bindings for every schema directory under the current tree
    /// protogen generate golang
    ///
    /// # TypeScript bindings, schemas under ./pbf/, output under ./src/pb/
    /// protogen generate typescript --source ./pbf/ --destination ./src/pb/
    ///
    /// # Inspect the plan without running the compiler
    /// protogen generate typescript --dry-run
    /// ```
    Generate {
        /// Code generation target
        #[arg(value_enum)]
        target: TargetKind,

        /// Directory scanned for `.proto` schemas
        #[arg(short, long, default_value = ".")]
        source: PathBuf,

        /// Directory generated code is written beneath
        #[arg(short, long, default_value = "./pkg/")]
        destination: PathBuf,

        /// Print the plan without running the compiler or writing files
        #[arg(long)]
        dry_run: bool,

        /// Seconds allowed per compiler invocation
        #[arg(long, default_value_t = 300)]
        timeout: u64,
    },

    /// Generate shell completions.
    ///
    /// Generates completion scripts for various shells that can be
    /// sourced or saved to enable tab completion for this CLI.
    Completions {
        /// Target shell for completion generation
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose)?;

    // Parse output format
    let output_format = cli
        .format
        .parse::<OutputFormat>()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    // Execute command and get exit code
    let exit_code = execute_command(cli.command, output_format).await?;

    // Exit with appropriate code
    std::process::exit(exit_code.as_i32());
}

/// Initializes logging infrastructure.
///
/// Sets up tracing with appropriate log levels based on verbosity flag.
/// Logs go to stderr so stdout stays clean for plans and summaries.
///
/// # Errors
///
/// Returns an error if logging initialization fails.
fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}

/// Executes the specified CLI command.
///
/// Routes commands to their respective handlers and returns an exit code.
///
/// # Errors
///
/// Returns an error if command execution fails.
async fn execute_command(command: Commands, output_format: OutputFormat) -> Result<ExitCode> {
    match command {
        Commands::Generate {
            target,
            source,
            destination,
            dry_run,
            timeout,
        } => {
            commands::generate::run(target, source, destination, dry_run, timeout, output_format)
                .await
        }
        Commands::Completions { shell } => {
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            commands::completions::run(shell, &mut cmd).await
        }
    }
}
