//! Generate command implementation.
//!
//! Scans the schema tree, plans one compiler invocation per schema
//! directory and argument template, then either prints the plan (dry run)
//! or runs the compiler and writes the target's aggregation files.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::Colorize;
use protogen_codegen::{Golang, PROTO_EXTENSION, Scanner, Target, TargetConfig, Typescript};
use protogen_core::cli::{ExitCode, OutputFormat};
use protogen_core::{Error, Invocation, OutputFile};
use serde::Serialize;
use tracing::{error, info};

/// Code generation target selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TargetKind {
    /// Go message and service bindings.
    Golang,
    /// TypeScript grpc-web bindings plus an `index.ts` aggregation file.
    Typescript,
}

impl TargetKind {
    /// Stable name used in logs and run summaries.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Golang => "golang",
            Self::Typescript => "typescript",
        }
    }
}

/// Everything a run would do, derived before anything touches the
/// filesystem.
#[derive(Debug)]
struct Plan {
    invocations: Vec<Invocation>,
    files: Vec<OutputFile>,
    directories: usize,
    schema_files: usize,
}

/// Everything a dry run prints: canonical command lines sorted for stable
/// output, plus the paths of the files the run would write.
#[derive(Debug, Serialize)]
struct PlanPreview {
    commands: Vec<String>,
    files: Vec<String>,
}

impl PlanPreview {
    fn new(plan: &Plan) -> Self {
        let mut commands: Vec<String> = plan
            .invocations
            .iter()
            .map(Invocation::command_line)
            .collect();
        commands.sort();

        let files = plan
            .files
            .iter()
            .map(|file| file.path.display().to_string())
            .collect();

        Self { commands, files }
    }
}

/// Result of a completed generation run.
#[derive(Debug, Serialize)]
struct GenerationSummary {
    /// Target name as given on the command line
    target: String,
    /// Schema directories discovered under the source tree
    directories: usize,
    /// Schema files discovered under the source tree
    schema_files: usize,
    /// Compiler invocations that ran
    invocations: usize,
    /// Aggregation files written beneath the destination
    files_written: usize,
}

/// Runs the generate command.
///
/// This command performs the following steps:
/// 1. Builds the target from the source and destination directories
/// 2. Scans the source tree and groups `.proto` files by directory
/// 3. Plans one compiler invocation per directory and argument template
/// 4. Runs the plan, or prints it when `dry_run` is set
/// 5. Writes the target's aggregation files
///
/// # Errors
///
/// Pipeline failures do not surface as `Err`; they are reported on stderr
/// and mapped to the matching [`ExitCode`]. Only output formatting can
/// fail with an error.
pub async fn run(
    target: TargetKind,
    source: PathBuf,
    destination: PathBuf,
    dry_run: bool,
    timeout_secs: u64,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    info!(
        target = target.as_str(),
        source = %source.display(),
        destination = %destination.display(),
        "planning code generation"
    );

    let plan = match build_plan(target, source, destination) {
        Ok(plan) => plan,
        Err(error) => return fail(&error),
    };

    info!(
        directories = plan.directories,
        schema_files = plan.schema_files,
        invocations = plan.invocations.len(),
        "plan ready"
    );

    if dry_run {
        let preview = PlanPreview::new(&plan);
        let formatted = crate::formatters::format_output(&preview, output_format)
            .context("failed to format plan preview")?;
        println!("{formatted}");
        return Ok(ExitCode::SUCCESS);
    }

    if let Err(error) = crate::executor::execute(&plan.invocations, timeout_secs).await {
        return fail(&error);
    }

    if let Err(error) = crate::executor::write(&plan.files) {
        return fail(&error);
    }

    let summary = GenerationSummary {
        target: target.as_str().to_string(),
        directories: plan.directories,
        schema_files: plan.schema_files,
        invocations: plan.invocations.len(),
        files_written: plan.files.len(),
    };

    let formatted = crate::formatters::format_output(&summary, output_format)
        .context("failed to format run summary")?;
    println!("{formatted}");

    Ok(ExitCode::SUCCESS)
}

/// Scans the source tree and derives the full plan for `kind`.
fn build_plan(
    kind: TargetKind,
    source: PathBuf,
    destination: PathBuf,
) -> protogen_core::Result<Plan> {
    // Target construction validates the configuration before any I/O runs.
    let scan_root = source.clone();
    let target = build_target(kind, TargetConfig { source, destination })?;

    let groups = Scanner::new(PROTO_EXTENSION).scan(&scan_root)?;
    let directories = groups.len();
    let schema_files = groups.values().map(Vec::len).sum::<usize>();

    let invocations = target.invocations(&groups)?;
    let files = target.files(&groups)?;

    Ok(Plan {
        invocations,
        files,
        directories,
        schema_files,
    })
}

fn build_target(kind: TargetKind, config: TargetConfig) -> protogen_core::Result<Box<dyn Target>> {
    match kind {
        TargetKind::Golang => Ok(Box::new(Golang::new(config)?)),
        TargetKind::Typescript => Ok(Box::new(Typescript::new(config)?)),
    }
}

/// Reports a pipeline failure and maps it to the exit code for its kind.
fn fail(error: &Error) -> Result<ExitCode> {
    error!("code generation failed: {error}");
    eprintln!("{} {error}", "error:".red().bold());
    Ok(ExitCode::from_error(error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_target_kind_names() {
        assert_eq!(TargetKind::Golang.as_str(), "golang");
        assert_eq!(TargetKind::Typescript.as_str(), "typescript");
    }

    #[test]
    fn test_build_target_validates_config() {
        let config = TargetConfig {
            source: PathBuf::new(),
            destination: PathBuf::from("pkg"),
        };
        let error = build_target(TargetKind::Golang, config).unwrap_err();
        assert!(error.is_config_error());
    }

    #[test]
    fn test_build_plan_counts_schemas_and_invocations() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(&root.join("pbf/foo.proto"));
        touch(&root.join("pbf/user/bar.proto"));

        let plan = build_plan(TargetKind::Golang, root.to_path_buf(), root.join("pkg")).unwrap();
        assert_eq!(plan.directories, 2);
        assert_eq!(plan.schema_files, 2);
        assert_eq!(plan.invocations.len(), 4);
        assert!(plan.files.is_empty());

        let plan =
            build_plan(TargetKind::Typescript, root.to_path_buf(), root.join("pkg")).unwrap();
        assert_eq!(plan.invocations.len(), 4);
        assert_eq!(plan.files.len(), 1);
    }

    #[test]
    fn test_plan_preview_sorts_command_lines() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(&root.join("pbf/user/api.proto"));
        touch(&root.join("pbf/post/api.proto"));

        let plan =
            build_plan(TargetKind::Typescript, root.to_path_buf(), root.join("pkg")).unwrap();
        let preview = PlanPreview::new(&plan);

        assert_eq!(preview.commands.len(), 4);
        assert!(preview.commands.is_sorted());
        assert_eq!(
            preview.files,
            vec![root.join("pkg/index.ts").display().to_string()]
        );
    }

    #[test]
    fn test_build_plan_missing_source_is_an_io_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing");
        let error = build_plan(TargetKind::Golang, missing, temp.path().join("pkg")).unwrap_err();
        assert!(error.is_io_error());
    }

    #[tokio::test]
    async fn test_run_dry_run_has_no_side_effects() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(&root.join("pbf/foo.proto"));
        let destination = root.join("pkg");

        let code = run(
            TargetKind::Typescript,
            root.to_path_buf(),
            destination.clone(),
            true,
            300,
            OutputFormat::Text,
        )
        .await
        .unwrap();

        assert_eq!(code, ExitCode::SUCCESS);
        assert!(!destination.exists());
    }

    #[tokio::test]
    async fn test_run_reports_invalid_configuration() {
        let code = run(
            TargetKind::Golang,
            PathBuf::new(),
            PathBuf::from("pkg"),
            false,
            300,
            OutputFormat::Text,
        )
        .await
        .unwrap();

        assert_eq!(code, ExitCode::INVALID_INPUT);
    }

    #[tokio::test]
    async fn test_run_reports_missing_source_trees() {
        let temp = TempDir::new().unwrap();
        let code = run(
            TargetKind::Golang,
            temp.path().join("missing"),
            temp.path().join("pkg"),
            false,
            300,
            OutputFormat::Text,
        )
        .await
        .unwrap();

        assert_eq!(code, ExitCode::ERROR);
    }
}
