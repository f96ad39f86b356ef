//! Source tree scanning.
//!
//! Walks a schema tree and partitions the files it finds by the directory
//! that directly contains them. The resulting groups drive both invocation
//! planning and aggregation rendering, so their keys are cleaned and their
//! file lists sorted: two scans of the same tree always produce the same
//! value.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use protogen_core::{Error, Result};

use crate::paths;

/// File extension recognized as a protocol buffer schema, without the dot.
pub const PROTO_EXTENSION: &str = "proto";

/// Directory names never descended into. Version control and CI metadata
/// can contain schema files that were never meant to be compiled.
const PRUNED_DIRS: [&str; 2] = [".git", ".github"];

/// Schema files grouped by the directory that directly contains them.
///
/// Keys are cleaned directory paths. Values hold the full paths of the
/// matching files found directly under that directory, sorted by file
/// name; files in subdirectories belong to their own group. Files directly
/// under a relative scan root group under the key `.`.
pub type DirectoryGroups = BTreeMap<PathBuf, Vec<PathBuf>>;

/// Walks a source tree and groups matching files by containing directory.
///
/// # Examples
///
/// ```no_run
/// use protogen_codegen::{Scanner, PROTO_EXTENSION};
/// use std::path::Path;
///
/// # fn example() -> protogen_core::Result<()> {
/// let scanner = Scanner::new(PROTO_EXTENSION);
/// let groups = scanner.scan(Path::new("."))?;
///
/// for (dir, files) in &groups {
///     println!("{}: {} schema files", dir.display(), files.len());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Scanner {
    extension: String,
}

impl Scanner {
    /// Creates a scanner for files with the given extension.
    ///
    /// The extension is accepted with or without the leading dot.
    #[must_use]
    pub fn new(extension: impl Into<String>) -> Self {
        let extension = extension.into();
        Self {
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    /// Scans the tree rooted at `root` and groups matching files by their
    /// containing directory.
    ///
    /// Directories named `.git` or `.github` are pruned entirely; the scan
    /// root itself is never pruned, whatever its name. Directories without
    /// matching files never appear as a key, and an empty tree yields an
    /// empty map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the root does not exist or a directory
    /// cannot be read, carrying the offending path.
    pub fn scan(&self, root: &Path) -> Result<DirectoryGroups> {
        let mut groups = DirectoryGroups::new();

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_pruned(entry));

        for entry in walker {
            let entry = entry.map_err(|source| {
                let path = source
                    .path()
                    .map_or_else(|| root.to_path_buf(), Path::to_path_buf);
                Error::Io {
                    path,
                    source: source.into(),
                }
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            if !self.matches_extension(entry.path()) {
                continue;
            }

            let file = paths::clean(entry.path());
            let dir = file
                .parent()
                .map_or_else(|| PathBuf::from("."), paths::clean);

            groups.entry(dir).or_default().push(file);
        }

        debug!(
            directories = groups.len(),
            root = %root.display(),
            "scanned schema tree"
        );

        Ok(groups)
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| extension == self.extension)
    }
}

fn is_pruned(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| PRUNED_DIRS.contains(&name))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_scan_groups_files_by_containing_directory() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(&root.join("pbf/foo.proto"));

        let groups = Scanner::new(PROTO_EXTENSION).scan(root).unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[&root.join("pbf")], vec![root.join("pbf/foo.proto")]);
    }

    #[test]
    fn test_scan_keeps_sibling_directories_separate() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(&root.join("pbf/post/api.proto"));
        touch(&root.join("pbf/post/create.proto"));
        touch(&root.join("pbf/user/foo.proto"));
        touch(&root.join("pbf/user/bar.proto"));
        touch(&root.join("pbf/user/baz.proto"));

        let groups = Scanner::new(PROTO_EXTENSION).scan(root).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups.get(&root.join("pbf/post")).unwrap().len(), 2);
        assert_eq!(groups.get(&root.join("pbf/user")).unwrap().len(), 3);
    }

    #[test]
    fn test_scan_does_not_merge_subdirectories_into_parents() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(&root.join("pbf/foo.proto"));
        touch(&root.join("pbf/user/bar.proto"));

        let groups = Scanner::new(PROTO_EXTENSION).scan(root).unwrap();

        assert_eq!(groups[&root.join("pbf")], vec![root.join("pbf/foo.proto")]);
        assert_eq!(
            groups[&root.join("pbf/user")],
            vec![root.join("pbf/user/bar.proto")]
        );
    }

    #[test]
    fn test_scan_sorts_files_by_name() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(&root.join("pbf/foo.proto"));
        touch(&root.join("pbf/bar.proto"));
        touch(&root.join("pbf/baz.proto"));

        let groups = Scanner::new(PROTO_EXTENSION).scan(root).unwrap();

        assert_eq!(
            groups[&root.join("pbf")],
            vec![
                root.join("pbf/bar.proto"),
                root.join("pbf/baz.proto"),
                root.join("pbf/foo.proto"),
            ]
        );
    }

    #[test]
    fn test_scan_ignores_other_extensions() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(&root.join("pbf/foo.proto"));
        touch(&root.join("pbf/readme.md"));
        touch(&root.join("pbf/schema.proto3"));
        touch(&root.join("pbf/noextension"));

        let groups = Scanner::new(PROTO_EXTENSION).scan(root).unwrap();

        assert_eq!(groups[&root.join("pbf")], vec![root.join("pbf/foo.proto")]);
    }

    #[test]
    fn test_scan_prunes_version_control_directories() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(&root.join("pbf/foo.proto"));
        touch(&root.join(".git/objects/skip.proto"));
        touch(&root.join(".github/workflows/skip.proto"));

        let groups = Scanner::new(PROTO_EXTENSION).scan(root).unwrap();

        assert_eq!(groups.len(), 1);
        assert!(groups.contains_key(&root.join("pbf")));
    }

    #[test]
    fn test_scan_never_prunes_the_root_itself() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join(".github");
        touch(&root.join("api.proto"));

        let groups = Scanner::new(PROTO_EXTENSION).scan(&root).unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[&root], vec![root.join("api.proto")]);
    }

    #[test]
    fn test_scan_restricts_to_the_given_subtree() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(&root.join("pbf/post/api.proto"));
        touch(&root.join("pbf/user/foo.proto"));
        touch(&root.join("pbf/more/deeply/nested/bar.proto"));

        let groups = Scanner::new(PROTO_EXTENSION)
            .scan(&root.join("pbf/user"))
            .unwrap();

        assert_eq!(groups.len(), 1);
        assert!(groups.contains_key(&root.join("pbf/user")));
    }

    #[test]
    fn test_scan_cleans_dot_components_from_paths() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(&root.join("pbf/foo.proto"));

        let groups = Scanner::new(PROTO_EXTENSION).scan(&root.join(".")).unwrap();

        assert_eq!(groups[&root.join("pbf")], vec![root.join("pbf/foo.proto")]);
    }

    #[test]
    fn test_scan_of_empty_tree_is_empty() {
        let temp = TempDir::new().unwrap();

        let groups = Scanner::new(PROTO_EXTENSION).scan(temp.path()).unwrap();

        assert!(groups.is_empty());
    }

    #[test]
    fn test_scan_of_missing_root_fails_with_io_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("does/not/exist");

        let err = Scanner::new(PROTO_EXTENSION).scan(&missing).unwrap_err();

        assert!(err.is_io_error());
        assert!(err.to_string().contains("does/not/exist"));
    }

    #[test]
    fn test_scan_twice_is_identical() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(&root.join("pbf/post/api.proto"));
        touch(&root.join("pbf/user/foo.proto"));
        touch(&root.join("pbf/user/bar.proto"));

        let scanner = Scanner::new(PROTO_EXTENSION);

        assert_eq!(scanner.scan(root).unwrap(), scanner.scan(root).unwrap());
    }

    #[test]
    fn test_extension_accepted_with_leading_dot() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(&root.join("pbf/foo.proto"));

        let groups = Scanner::new(".proto").scan(root).unwrap();

        assert_eq!(groups.len(), 1);
    }
}
