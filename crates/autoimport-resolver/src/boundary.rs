//! Sub-project boundary search.
//!
//! A sub-project is the nearest ancestor directory holding its own
//! `tsconfig.json`. The workspace root's own `tsconfig.json` never counts: the
//! walk stops before reaching it.

use std::path::{Path, PathBuf};
use tracing::{trace, warn};

use autoimport_common::limits::MAX_BOUNDARY_WALK_DEPTH;
use autoimport_common::normalize_path;
use autoimport_config::TSCONFIG_FILE_NAME;

/// Path of the nearest `tsconfig.json` at or above `start_dir`, strictly
/// below `workspace_root`.
///
/// Returns `None` when the walk reaches the workspace root, the filesystem
/// root, or [`MAX_BOUNDARY_WALK_DEPTH`] without finding one. Probes that fail
/// (permissions, I/O) read as "no file here" and the walk continues upward.
pub fn find_nearest_boundary(start_dir: &Path, workspace_root: &Path) -> Option<PathBuf> {
    let root = normalize_path(workspace_root);
    let mut current = normalize_path(start_dir);

    for _ in 0..MAX_BOUNDARY_WALK_DEPTH {
        if current == root || current.as_os_str().is_empty() {
            return None;
        }

        let candidate = current.join(TSCONFIG_FILE_NAME);
        if candidate.is_file() {
            trace!(boundary = %candidate.display(), "found sub-project boundary");
            return Some(candidate);
        }

        if !current.pop() {
            return None;
        }
    }

    warn!(
        start = %start_dir.display(),
        root = %workspace_root.display(),
        limit = MAX_BOUNDARY_WALK_DEPTH,
        "boundary walk exceeded depth limit"
    );
    None
}

/// Boundary of the directory containing `file`.
pub fn boundary_for_file(file: &Path, workspace_root: &Path) -> Option<PathBuf> {
    find_nearest_boundary(file.parent()?, workspace_root)
}
