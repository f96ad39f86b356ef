//! Path normalization helpers.
//!
//! Scanned keys and joined output directories must compare equal regardless
//! of how the user spelled the roots (`./pkg/` vs `pkg`), so every path that
//! ends up in a group key or an invocation is cleaned first.

use std::path::{Component, Path, PathBuf};

use tracing::warn;

/// Drops `.` components so equivalent spellings collapse to one form.
///
/// An empty result collapses to `.`, mirroring how a file directly under
/// the scan root is grouped.
pub fn clean(path: &Path) -> PathBuf {
    let cleaned: PathBuf = path
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect();

    if cleaned.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        cleaned
    }
}

/// Returns `path` relative to `root`, both cleaned.
///
/// A root of `.` leaves the already relative path untouched. A path that
/// does not live under `root` is returned unchanged.
pub fn relative_to(path: &Path, root: &Path) -> PathBuf {
    let path = clean(path);
    let root = clean(root);

    if root == Path::new(".") {
        return path;
    }

    if let Ok(stripped) = path.strip_prefix(&root) {
        return stripped.to_path_buf();
    }

    warn!(
        path = %path.display(),
        root = %root.display(),
        "path is outside the root, using it unchanged"
    );
    path
}
