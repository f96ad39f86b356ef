//! Compiler invocation planning.
//!
//! Turns directory groups into [`Invocation`] descriptors by substituting
//! three named slots into per-target argument templates. Planning is pure:
//! all validation happens when the planner is constructed, and `plan` cannot
//! fail.

use std::path::PathBuf;

use tracing::debug;

use protogen_core::{Error, Invocation, Result};

use crate::paths;
use crate::scanner::DirectoryGroups;

const OUT_SLOT: &str = "{out}";
const PATH_SLOT: &str = "{path}";
const FILES_SLOT: &str = "{files}";

/// A validated argument template with three named substitution slots.
///
/// `{out}` receives the invocation's output directory, `{path}` the group's
/// directory (the compiler's schema search path), and `{files}` the group's
/// file paths joined by single spaces. The rendered string is split on
/// whitespace to derive the argument list, which means file names containing
/// whitespace are not supported.
///
/// # Examples
///
/// ```
/// use protogen_codegen::ArgTemplate;
///
/// let template = ArgTemplate::new("--go_out={out}/ --proto_path={path} {files}")?;
/// assert!(template.as_str().contains("{out}"));
///
/// // Every slot must be present.
/// assert!(ArgTemplate::new("--go_out={out}/").is_err());
/// # Ok::<(), protogen_core::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgTemplate {
    format: String,
}

impl ArgTemplate {
    /// Creates a validated argument template.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when one of the `{out}`, `{path}` or
    /// `{files}` slots is missing.
    pub fn new(format: impl Into<String>) -> Result<Self> {
        let format = format.into();

        for slot in [OUT_SLOT, PATH_SLOT, FILES_SLOT] {
            if !format.contains(slot) {
                return Err(Error::Config {
                    message: format!("argument template '{format}' is missing the {slot} slot"),
                });
            }
        }

        Ok(Self { format })
    }

    /// Returns the template text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.format
    }

    fn substitute(&self, out: &str, path: &str, files: &str) -> String {
        self.format
            .replace(OUT_SLOT, out)
            .replace(PATH_SLOT, path)
            .replace(FILES_SLOT, files)
    }
}

/// Configuration for a [`Planner`].
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Compiler binary name, resolved through `PATH`.
    pub binary: String,
    /// Argument templates. Every directory group yields one invocation per
    /// template.
    pub templates: Vec<ArgTemplate>,
    /// Root the schema tree was scanned from.
    pub source: PathBuf,
    /// Root directory generated code goes into.
    pub destination: PathBuf,
}

/// Builds invocation descriptors from directory groups.
///
/// # Examples
///
/// ```
/// use protogen_codegen::{ArgTemplate, DirectoryGroups, Planner, PlannerConfig};
/// use std::path::PathBuf;
///
/// let planner = Planner::new(PlannerConfig {
///     binary: "protoc".to_string(),
///     templates: vec![ArgTemplate::new("--go_out={out}/ --proto_path={path} {files}")?],
///     source: PathBuf::from("."),
///     destination: PathBuf::from("./pkg/"),
/// })?;
///
/// let mut groups = DirectoryGroups::new();
/// groups.insert(PathBuf::from("pbf"), vec![PathBuf::from("pbf/foo.proto")]);
///
/// let invocations = planner.plan(&groups);
/// assert_eq!(
///     invocations[0].command_line(),
///     "protoc --go_out=pkg/pbf/ --proto_path=pbf pbf/foo.proto"
/// );
/// # Ok::<(), protogen_core::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Planner {
    binary: String,
    templates: Vec<ArgTemplate>,
    source: PathBuf,
    destination: PathBuf,
}

impl Planner {
    /// Creates a planner from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the binary, source or destination
    /// is empty, or when no argument template is given.
    pub fn new(config: PlannerConfig) -> Result<Self> {
        if config.binary.is_empty() {
            return Err(Error::Config {
                message: "binary must not be empty".to_string(),
            });
        }

        if config.templates.is_empty() {
            return Err(Error::Config {
                message: "at least one argument template is required".to_string(),
            });
        }

        if config.source.as_os_str().is_empty() {
            return Err(Error::Config {
                message: "source must not be empty".to_string(),
            });
        }

        if config.destination.as_os_str().is_empty() {
            return Err(Error::Config {
                message: "destination must not be empty".to_string(),
            });
        }

        Ok(Self {
            binary: config.binary,
            templates: config.templates,
            source: config.source,
            destination: config.destination,
        })
    }

    /// Builds one invocation per directory group and argument template.
    ///
    /// The output directory is the destination root joined with the group's
    /// path relative to the source root. For N groups and M templates the
    /// result holds exactly N times M descriptors, ordered by group key and
    /// template position.
    #[must_use]
    pub fn plan(&self, groups: &DirectoryGroups) -> Vec<Invocation> {
        let mut invocations = Vec::with_capacity(groups.len() * self.templates.len());

        for (dir, files) in groups {
            let relative = paths::relative_to(dir, &self.source);
            let out_dir = paths::clean(&self.destination.join(relative));

            let out = out_dir.display().to_string();
            let path = dir.display().to_string();
            let list = files
                .iter()
                .map(|file| file.display().to_string())
                .collect::<Vec<_>>()
                .join(" ");

            for template in &self.templates {
                let rendered = template.substitute(&out, &path, &list);
                let arguments = rendered.split_whitespace().map(str::to_string).collect();

                invocations.push(Invocation::new(
                    self.binary.clone(),
                    arguments,
                    out_dir.clone(),
                ));
            }
        }

        debug!(invocations = invocations.len(), "planned compiler invocations");

        invocations
    }
}
