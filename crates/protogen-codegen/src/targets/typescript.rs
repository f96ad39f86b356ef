//! TypeScript generation target.

use std::path::PathBuf;

use protogen_core::{Invocation, OutputFile, Result};

use crate::planner::{ArgTemplate, Planner, PlannerConfig};
use crate::renderer::Renderer;
use crate::scanner::DirectoryGroups;
use crate::targets::{Target, TargetConfig};

const BINARY: &str = "protoc";

/// Argument template generating legacy JavaScript message code. Generation
/// still runs in two steps while the upstream ecosystem migrates towards
/// native TypeScript output.
const JS_ARG: &str = "--experimental_allow_proto3_optional \
                      --js_out=import_style=commonjs,binary:{out} \
                      --proto_path={path} {files}";

/// Argument template generating TypeScript grpc-web client code.
const TS_ARG: &str = "--experimental_allow_proto3_optional \
                      --grpc-web_out=import_style=typescript,mode=grpcwebtext:{out} \
                      --proto_path={path} {files}";

const INDEX_TEMPLATE: &str = "typescript/index";
const INDEX_FILE: &str = "index.ts";

/// Generates TypeScript grpc-web client code plus an `index.ts` barrel.
///
/// Every directory group yields two `protoc` invocations, one per plugin.
/// On top of that the target renders one aggregation file at the
/// destination root, re-exporting each directory's generated modules under
/// a capitalized export name.
///
/// # Examples
///
/// ```
/// use protogen_codegen::{DirectoryGroups, Target, TargetConfig, Typescript};
/// use std::path::PathBuf;
///
/// let target = Typescript::new(TargetConfig {
///     source: PathBuf::from("."),
///     destination: PathBuf::from("./pkg/"),
/// })?;
///
/// let mut groups = DirectoryGroups::new();
/// groups.insert(
///     PathBuf::from("pbf/user"),
///     vec![PathBuf::from("pbf/user/api.proto")],
/// );
///
/// assert_eq!(target.invocations(&groups)?.len(), 2);
///
/// let files = target.files(&groups)?;
/// assert_eq!(files[0].path, PathBuf::from("pkg/index.ts"));
/// # Ok::<(), protogen_core::Error>(())
/// ```
#[derive(Debug)]
pub struct Typescript {
    planner: Planner,
    renderer: Renderer<'static>,
    destination: PathBuf,
}

impl Typescript {
    /// Creates the TypeScript target.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the source or destination is
    /// empty. A template error here means the embedded aggregation template
    /// is broken and cannot happen with a correct build.
    pub fn new(config: TargetConfig) -> Result<Self> {
        let destination = config.destination.clone();

        let planner = Planner::new(PlannerConfig {
            binary: BINARY.to_string(),
            templates: vec![ArgTemplate::new(JS_ARG)?, ArgTemplate::new(TS_ARG)?],
            source: config.source,
            destination: config.destination,
        })?;

        let mut renderer = Renderer::new();
        renderer.register_template(
            INDEX_TEMPLATE,
            include_str!("../../templates/index.ts.hbs"),
        )?;

        Ok(Self {
            planner,
            renderer,
            destination,
        })
    }

    fn index_path(&self) -> PathBuf {
        crate::paths::clean(&self.destination.join(INDEX_FILE))
    }
}

impl Target for Typescript {
    fn invocations(&self, groups: &DirectoryGroups) -> Result<Vec<Invocation>> {
        Ok(self.planner.plan(groups))
    }

    fn files(&self, groups: &DirectoryGroups) -> Result<Vec<OutputFile>> {
        let index = self
            .renderer
            .render(INDEX_TEMPLATE, groups, self.index_path())?;

        Ok(vec![index])
    }
}
