//! Turning symbol-catalog hits into import suggestions.
//!
//! The catalog of exported symbols lives outside this crate (the host keeps
//! it); [`ExportCatalog`] is the seam. Every hit is run through the resolver
//! and only resolvable ones come back as suggestions.

use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::registry::WorkspaceRegistry;
use crate::resolver::Resolution;

/// One place that exports `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportCandidate {
    pub name: String,
    pub declaring_file: PathBuf,
    pub workspace_root: PathBuf,
    /// Found by a scan or watcher rather than by indexing an open file.
    pub discovered: bool,
}

pub trait ExportCatalog {
    fn lookup(&self, name: &str, context_file: &Path) -> Vec<ImportCandidate>;
}

impl<F> ExportCatalog for F
where
    F: Fn(&str, &Path) -> Vec<ImportCandidate>,
{
    fn lookup(&self, name: &str, context_file: &Path) -> Vec<ImportCandidate> {
        self(name, context_file)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSuggestion {
    pub name: String,
    pub declaring_file: PathBuf,
    pub resolution: Resolution,
}

impl ImportSuggestion {
    /// Text after `from`.
    pub fn specifier(&self) -> &str {
        self.resolution.specifier().unwrap_or_default()
    }

    /// Title shown to the user, e.g. `Import Button from @ui/button`.
    pub fn title(&self) -> String {
        format!("Import {} from {}", self.name, self.specifier())
    }
}

impl WorkspaceRegistry {
    /// Resolvable suggestions for `name` as seen from `consuming_file`, in
    /// catalog order with duplicate `(name, specifier)` pairs removed.
    pub fn suggest_imports(
        &self,
        catalog: &dyn ExportCatalog,
        name: &str,
        consuming_file: &Path,
    ) -> Vec<ImportSuggestion> {
        let mut seen: FxHashSet<(String, String)> = FxHashSet::default();
        let mut suggestions = Vec::new();

        for candidate in catalog.lookup(name, consuming_file) {
            if candidate.discovered {
                self.record_discovered_file(&candidate.workspace_root, &candidate.declaring_file);
            }

            let resolution = self.resolve_import_path(
                &candidate.declaring_file,
                consuming_file,
                &candidate.workspace_root,
            );
            let Some(spec) = resolution.specifier() else {
                debug!(
                    name = %candidate.name,
                    declaring = %candidate.declaring_file.display(),
                    "candidate not resolvable, skipping"
                );
                continue;
            };

            if !seen.insert((candidate.name.clone(), spec.to_string())) {
                continue;
            }
            suggestions.push(ImportSuggestion {
                name: candidate.name,
                declaring_file: candidate.declaring_file,
                resolution,
            });
        }

        suggestions
    }
}
