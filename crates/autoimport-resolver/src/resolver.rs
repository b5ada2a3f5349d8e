//! Import-path resolution.
//!
//! Given the file that declares a symbol and the file that wants to import
//! it, produce the string that belongs after `from` in the import statement:
//!
//! 1. If both files sit under the same nearest sub-project boundary (see
//!    [`crate::boundary`]), use a relative path: `./foo`, `../lib/foo`.
//! 2. Otherwise map the declaring file through the workspace alias table:
//!    `@shared/util`.
//! 3. If neither applies the result is [`Resolution::NotResolvable`].
//!
//! Files with no boundary at all compare equal, so two files in a
//! single-project workspace always get a relative path.

use std::path::Path;
use tracing::trace;

use autoimport_common::{normalize_path, relative_path, strip_module_extension, to_forward_slashes};
use autoimport_config::AliasTable;

use crate::boundary::boundary_for_file;
use crate::cache::ResolvedImportCache;

/// Outcome of resolving one import.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// Same sub-project: `./foo`, `../shared/foo`
    Relative(String),
    /// Different sub-projects, mapped through `compilerOptions.paths`
    Alias(String),
    /// No import path could be determined; callers offer no automatic import.
    NotResolvable,
}

impl Resolution {
    pub fn specifier(&self) -> Option<&str> {
        match self {
            Resolution::Relative(spec) | Resolution::Alias(spec) => Some(spec),
            Resolution::NotResolvable => None,
        }
    }

    pub fn into_specifier(self) -> Option<String> {
        match self {
            Resolution::Relative(spec) | Resolution::Alias(spec) => Some(spec),
            Resolution::NotResolvable => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, Resolution::NotResolvable)
    }
}

/// Resolver bound to one workspace's alias table (and optionally its cache).
#[derive(Debug, Clone, Copy)]
pub struct ImportResolver<'a> {
    table: &'a AliasTable,
    cache: Option<&'a ResolvedImportCache>,
}

impl<'a> ImportResolver<'a> {
    pub fn new(table: &'a AliasTable) -> Self {
        ImportResolver { table, cache: None }
    }

    /// Consult `cache` before computing alias paths.
    pub fn with_cache(mut self, cache: &'a ResolvedImportCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn resolve(
        &self,
        declaring_file: &Path,
        consuming_file: &Path,
        workspace_root: &Path,
    ) -> Resolution {
        let declaring = normalize_path(declaring_file);
        let consuming = normalize_path(consuming_file);

        let declaring_boundary = boundary_for_file(&declaring, workspace_root);
        let consuming_boundary = boundary_for_file(&consuming, workspace_root);

        if declaring_boundary == consuming_boundary {
            let spec = relative_module_specifier(&declaring, &consuming);
            trace!(
                declaring = %declaring.display(),
                consuming = %consuming.display(),
                boundary = ?declaring_boundary,
                spec = %spec,
                "same boundary, using relative path"
            );
            return Resolution::Relative(spec);
        }

        match self.alias_path(&declaring) {
            Some(spec) => Resolution::Alias(spec),
            None => {
                trace!(
                    declaring = %declaring.display(),
                    configured = self.table.is_configured(),
                    "no alias prefix matches"
                );
                Resolution::NotResolvable
            }
        }
    }

    /// Alias-qualified path for `declaring_file`, ignoring boundaries.
    pub fn alias_path(&self, declaring_file: &Path) -> Option<String> {
        if !self.table.is_configured() {
            return None;
        }
        if let Some(cached) = self.cache.and_then(|cache| cache.get(declaring_file)) {
            return Some(cached);
        }
        self.table.alias_path_for(declaring_file)
    }
}

/// Resolve against `table` without a cache.
pub fn resolve_import_path(
    table: &AliasTable,
    declaring_file: &Path,
    consuming_file: &Path,
    workspace_root: &Path,
) -> Resolution {
    ImportResolver::new(table).resolve(declaring_file, consuming_file, workspace_root)
}

/// `./`-prefixed, extensionless, `/`-separated path from the consuming file's
/// directory to the declaring file.
pub fn relative_module_specifier(declaring_file: &Path, consuming_file: &Path) -> String {
    let declaring = normalize_path(declaring_file);
    let consuming = normalize_path(consuming_file);
    let from_dir = consuming.parent().unwrap_or(Path::new(""));

    let mut spec = to_forward_slashes(&relative_path(from_dir, &declaring));
    if !spec.starts_with("./") && !spec.starts_with("../") {
        spec = format!("./{}", spec);
    }
    strip_module_extension(&spec).to_string()
}
