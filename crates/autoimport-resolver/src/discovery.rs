//! Initial workspace scan for importable source files.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use autoimport_common::limits::MAX_SCAN_DEPTH;

use crate::registry::WorkspaceRegistry;

/// `.ts` and `.tsx` files that can declare exports. Declaration files are
/// skipped; they describe code that lives elsewhere.
pub fn is_exportable_source(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return false;
    };
    if name.ends_with(".d.ts") {
        return false;
    }
    name.ends_with(".ts") || name.ends_with(".tsx")
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name == "node_modules" || name.starts_with('.')
}

/// Exportable sources under `root`, sorted. `node_modules` and dot-directories
/// are not entered.
pub fn collect_sources(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .max_depth(MAX_SCAN_DEPTH)
        .into_iter()
        .filter_entry(|entry| !is_skipped_dir(entry))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(root = %root.display(), error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if entry.file_type().is_file() && is_exportable_source(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    debug!(root = %root.display(), count = files.len(), "workspace scan complete");
    files
}

/// Record the alias path of every source file under `workspace_root` that
/// has one. Returns the number of files recorded.
pub fn scan_workspace(registry: &WorkspaceRegistry, workspace_root: &Path) -> usize {
    let workspace = registry.workspace(workspace_root);
    collect_sources(workspace.root())
        .iter()
        .filter(|file| workspace.record_discovered_file(file).is_some())
        .count()
}
