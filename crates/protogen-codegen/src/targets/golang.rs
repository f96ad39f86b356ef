//! Go generation target.

use protogen_core::{Invocation, OutputFile, Result};

use crate::planner::{ArgTemplate, Planner, PlannerConfig};
use crate::scanner::DirectoryGroups;
use crate::targets::{Target, TargetConfig};

const BINARY: &str = "protoc";

/// Argument template generating Go structs from message definitions.
/// Message and service code generation run as separate invocations because
/// upstream splits them across two compiler plugins.
const MSG_ARG: &str = "--go_out={out}/ --proto_path={path} {files}";

/// Argument template generating Go interfaces from service definitions.
const SVC_ARG: &str = "--go-grpc_out={out}/ --proto_path={path} {files}";

/// Generates Go message structs and service interfaces.
///
/// Every directory group yields two `protoc` invocations, one per plugin.
/// Go needs no aggregation file; the generated packages are imported
/// directly.
///
/// # Examples
///
/// ```
/// use protogen_codegen::{DirectoryGroups, Golang, Target, TargetConfig};
/// use std::path::PathBuf;
///
/// let target = Golang::new(TargetConfig {
///     source: PathBuf::from("."),
///     destination: PathBuf::from("./pkg/"),
/// })?;
///
/// let mut groups = DirectoryGroups::new();
/// groups.insert(PathBuf::from("pbf"), vec![PathBuf::from("pbf/foo.proto")]);
///
/// assert_eq!(target.invocations(&groups)?.len(), 2);
/// assert!(target.files(&groups)?.is_empty());
/// # Ok::<(), protogen_core::Error>(())
/// ```
#[derive(Debug)]
pub struct Golang {
    planner: Planner,
}

impl Golang {
    /// Creates the Go target.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the source or destination is
    /// empty.
    pub fn new(config: TargetConfig) -> Result<Self> {
        let planner = Planner::new(PlannerConfig {
            binary: BINARY.to_string(),
            templates: vec![ArgTemplate::new(MSG_ARG)?, ArgTemplate::new(SVC_ARG)?],
            source: config.source,
            destination: config.destination,
        })?;

        Ok(Self { planner })
    }
}

impl Target for Golang {
    fn invocations(&self, groups: &DirectoryGroups) -> Result<Vec<Invocation>> {
        Ok(self.planner.plan(groups))
    }

    fn files(&self, _groups: &DirectoryGroups) -> Result<Vec<OutputFile>> {
        Ok(Vec::new())
    }
}
