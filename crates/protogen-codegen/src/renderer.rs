//! Aggregation file rendering.
//!
//! Renders templated artifacts from directory groups using Handlebars.
//! Every group contributes one entry carrying its directory path and the
//! identifier its generated code is exported under. Entries are sorted
//! lexicographically by directory before rendering, so the output is
//! byte-identical across runs.

use std::path::{Path, PathBuf};

use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use protogen_core::{Error, OutputFile, Result};

use crate::scanner::DirectoryGroups;

/// Per-directory entry handed to aggregation templates.
#[derive(Debug, Serialize)]
struct ModuleEntry {
    /// Directory path as scanned, used for import specifiers.
    dir: String,
    /// Identifier the directory's generated code is exported under.
    export: String,
}

#[derive(Debug, Serialize)]
struct AggregationContext {
    modules: Vec<ModuleEntry>,
}

/// Renders aggregation files from directory groups.
///
/// Wraps a strict mode Handlebars registry: templates referencing fields
/// absent from the context fail instead of rendering empty strings.
///
/// # Examples
///
/// ```
/// use protogen_codegen::{DirectoryGroups, Renderer};
/// use std::path::PathBuf;
///
/// let mut renderer = Renderer::new();
/// renderer.register_template("list", "{{#each modules}}{{dir}}={{export}};{{/each}}")?;
///
/// let mut groups = DirectoryGroups::new();
/// groups.insert(PathBuf::from("pbf/user"), vec![PathBuf::from("pbf/user/foo.proto")]);
///
/// let file = renderer.render("list", &groups, "pkg/index.ts")?;
/// assert_eq!(file.contents_utf8(), Some("pbf/user=User;"));
/// # Ok::<(), protogen_core::Error>(())
/// ```
#[derive(Debug)]
pub struct Renderer<'a> {
    handlebars: Handlebars<'a>,
}

impl Renderer<'_> {
    /// Creates a renderer with an empty template registry.
    #[must_use]
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();

        // Strict mode: fail on missing variables
        handlebars.set_strict_mode(true);

        Self { handlebars }
    }

    /// Registers a template under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Template`] when the template fails to parse,
    /// carrying the engine's message.
    pub fn register_template(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| Error::Template {
                message: format!("failed to register template '{name}': {e}"),
            })
    }

    /// Renders the template registered under `name` against the groups and
    /// wraps the result into a descriptor for `path`.
    ///
    /// The template sees one `modules` entry per directory group, each with
    /// a `dir` field (the directory path) and an `export` field (the final
    /// path segment with its first letter capitalized), sorted
    /// lexicographically by `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Template`] when the template is not registered or
    /// fails to render.
    pub fn render(
        &self,
        name: &str,
        groups: &DirectoryGroups,
        path: impl Into<PathBuf>,
    ) -> Result<OutputFile> {
        let context = context_from(groups);

        let text = self
            .handlebars
            .render(name, &context)
            .map_err(|e| Error::Template {
                message: format!("failed to render template '{name}': {e}"),
            })?;

        let path = path.into();

        debug!(
            template = name,
            modules = context.modules.len(),
            path = %path.display(),
            "rendered aggregation file"
        );

        Ok(OutputFile::new(path, text))
    }
}

impl Default for Renderer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

fn context_from(groups: &DirectoryGroups) -> AggregationContext {
    let mut modules: Vec<ModuleEntry> = groups
        .keys()
        .map(|dir| ModuleEntry {
            dir: dir.display().to_string(),
            export: export_name(dir),
        })
        .collect();

    // Plain string order, not component order: keys like "a-b" sort before
    // "a/c" so rendered output is stable across map implementations.
    modules.sort_by(|a, b| a.dir.cmp(&b.dir));

    AggregationContext { modules }
}

fn export_name(dir: &Path) -> String {
    let base = dir.file_name().and_then(|name| name.to_str()).unwrap_or(".");

    let mut chars = base.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    fn groups_from(dirs: &[&str]) -> DirectoryGroups {
        let mut groups = DirectoryGroups::new();
        for dir in dirs {
            groups.insert(
                PathBuf::from(dir),
                vec![PathBuf::from(dir).join("api.proto")],
            );
        }
        groups
    }

    // ========================================================================
    // Registration Tests
    // ========================================================================

    #[test]
    fn test_renderer_creation() {
        let _renderer = Renderer::new();
        let _default = Renderer::default();
    }

    #[test]
    fn test_register_invalid_template_syntax() {
        let mut renderer = Renderer::new();

        let err = renderer
            .register_template("broken", "Hello {{modules")
            .unwrap_err();

        assert!(err.is_template_error());
        assert!(err.to_string().contains("broken"));
    }

    // ========================================================================
    // Rendering Tests
    // ========================================================================

    #[test]
    fn test_render_exposes_dir_and_export_fields() {
        let mut renderer = Renderer::new();
        renderer
            .register_template("list", "{{#each modules}}{{dir}}={{export}};{{/each}}")
            .unwrap();

        let file = renderer
            .render("list", &groups_from(&["pbf/user"]), "pkg/index.ts")
            .unwrap();

        assert_eq!(file.path, PathBuf::from("pkg/index.ts"));
        assert_eq!(file.contents_utf8(), Some("pbf/user=User;"));
    }

    #[test]
    fn test_render_capitalizes_the_final_path_segment() {
        let mut renderer = Renderer::new();
        renderer
            .register_template("exports", "{{#each modules}}{{export}} {{/each}}")
            .unwrap();

        let file = renderer
            .render("exports", &groups_from(&["pbf", "pbf/post", "pbf/user"]), "index.ts")
            .unwrap();

        assert_eq!(file.contents_utf8(), Some("Pbf Post User "));
    }

    #[test]
    fn test_render_orders_entries_lexicographically() {
        let mut renderer = Renderer::new();
        renderer
            .register_template("dirs", "{{#each modules}}{{dir}};{{/each}}")
            .unwrap();

        // Component order would put "a/c" before "a-b"; string order must win.
        let file = renderer
            .render("dirs", &groups_from(&["a/c", "a-b"]), "index.ts")
            .unwrap();

        assert_eq!(file.contents_utf8(), Some("a-b;a/c;"));
    }

    #[test]
    fn test_render_of_empty_groups_keeps_only_surrounding_text() {
        let mut renderer = Renderer::new();
        renderer
            .register_template("page", "header;{{#each modules}}{{dir}};{{/each}}footer;")
            .unwrap();

        let file = renderer
            .render("page", &DirectoryGroups::new(), "index.ts")
            .unwrap();

        assert_eq!(file.contents_utf8(), Some("header;footer;"));
    }

    #[test]
    fn test_render_is_identical_across_runs() {
        let mut renderer = Renderer::new();
        renderer
            .register_template("list", "{{#each modules}}{{dir}}={{export}};{{/each}}")
            .unwrap();

        let groups = groups_from(&["pbf/post", "pbf/user"]);

        let first = renderer.render("list", &groups, "index.ts").unwrap();
        let second = renderer.render("list", &groups, "index.ts").unwrap();

        assert_eq!(first, second);
    }

    // ========================================================================
    // Error Handling Tests
    // ========================================================================

    #[test]
    fn test_render_of_unregistered_template_fails() {
        let renderer = Renderer::new();

        let err = renderer
            .render("missing", &groups_from(&["pbf"]), "index.ts")
            .unwrap_err();

        assert!(err.is_template_error());
    }

    #[test]
    fn test_strict_mode_fails_on_unknown_fields() {
        let mut renderer = Renderer::new();
        renderer
            .register_template("strict", "{{#each modules}}{{no_such_field}}{{/each}}")
            .unwrap();

        let err = renderer
            .render("strict", &groups_from(&["pbf"]), "index.ts")
            .unwrap_err();

        assert!(err.is_template_error());
    }

    // ========================================================================
    // Export Name Tests
    // ========================================================================

    #[test]
    fn test_export_name_uses_the_final_segment() {
        assert_eq!(export_name(Path::new("pbf/user")), "User");
        assert_eq!(export_name(Path::new("pbf")), "Pbf");
        assert_eq!(export_name(Path::new("pbf/more/deeply/nested")), "Nested");
    }

    #[test]
    fn test_export_name_capitalizes_only_the_first_letter() {
        assert_eq!(export_name(Path::new("pbf/userData")), "UserData");
        assert_eq!(export_name(Path::new("pbf/user_data")), "User_data");
    }
}
