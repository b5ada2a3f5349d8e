//! Alias table: `compilerOptions.paths` + `baseUrl` resolved for one
//! workspace root.
//!
//! Only wildcard entries participate in lookups:
//!
//! ```json
//! { "compilerOptions": { "baseUrl": ".", "paths": { "@shared/*": ["libs/shared/*"] } } }
//! ```
//!
//! maps `/ws/libs/shared/util.ts` to `@shared/util`. Exact (non-wildcard)
//! entries are kept in the mapping for completeness but never matched.

use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

use autoimport_common::{normalize_path, strip_ts_extension, to_forward_slashes};

use crate::error::ConfigError;
use crate::settings::AutoImportSettings;
use crate::tsconfig::{PathsMap, TsConfig, classify_load_error, load_tsconfig};

/// Trailing marker that turns a `paths` key or target into a prefix pattern.
pub const WILDCARD: &str = "/*";

/// Project configuration file name. Also the sub-project boundary marker.
pub const TSCONFIG_FILE_NAME: &str = "tsconfig.json";

/// One `paths` entry: `"@shared/*": ["libs/shared/*", "vendor/shared/*"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasEntry {
    pub alias_prefix: String,
    pub target_patterns: Vec<String>,
}

impl AliasEntry {
    /// Alias prefix with the wildcard removed (`@shared`), or `None` for
    /// exact entries.
    pub fn alias_base(&self) -> Option<&str> {
        self.alias_prefix.strip_suffix(WILDCARD)
    }

    /// Target patterns that end in the wildcard, with it removed.
    pub fn wildcard_targets(&self) -> impl Iterator<Item = &str> {
        self.target_patterns
            .iter()
            .filter_map(|target| target.trim().strip_suffix(WILDCARD))
    }
}

/// Ordered `paths` entries. Entries with no targets are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasMapping {
    entries: Vec<AliasEntry>,
}

impl AliasMapping {
    pub fn from_paths(paths: &PathsMap) -> Self {
        let entries = paths
            .iter()
            .filter(|(_, targets)| !targets.is_empty())
            .map(|(pattern, targets)| AliasEntry {
                alias_prefix: pattern.trim().to_string(),
                target_patterns: targets.clone(),
            })
            .collect();
        AliasMapping { entries }
    }

    pub fn entries(&self) -> &[AliasEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A wildcard pair resolved against the base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasPrefix {
    /// `@shared`
    pub alias_base: String,
    /// `/ws/libs/shared`, normalized
    pub target_prefix: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    mapping: Option<AliasMapping>,
    base_dir: Option<PathBuf>,
    /// Eligible `(alias, target)` pairs in declaration order. Derived from
    /// `mapping` and `base_dir` so the three never disagree.
    prefixes: Vec<AliasPrefix>,
}

impl AliasTable {
    pub fn new(mapping: Option<AliasMapping>, base_dir: Option<PathBuf>) -> Self {
        let base_dir = base_dir.map(|dir| normalize_path(&dir));
        let prefixes = match (&mapping, &base_dir) {
            (Some(mapping), Some(base_dir)) => build_prefixes(mapping, base_dir),
            _ => Vec::new(),
        };
        AliasTable {
            mapping,
            base_dir,
            prefixes,
        }
    }

    pub fn mapping(&self) -> Option<&AliasMapping> {
        self.mapping.as_ref()
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    pub fn prefixes(&self) -> &[AliasPrefix] {
        &self.prefixes
    }

    /// Both the mapping and the base directory are set.
    pub fn is_configured(&self) -> bool {
        self.mapping.is_some() && self.base_dir.is_some()
    }

    /// Build the table for `workspace_root` from `tsconfig.json` and the
    /// optional override file named in `settings`.
    ///
    /// Missing or unreadable files leave the corresponding fields unset. The
    /// override file supersedes the default for whichever of `paths` and
    /// `baseUrl` it defines.
    pub fn load(
        workspace_root: &Path,
        settings: &AutoImportSettings,
    ) -> Result<Self, ConfigError> {
        let mut mapping = None;
        let mut base_dir = None;

        let mut sources = vec![workspace_root.join(TSCONFIG_FILE_NAME)];
        if let Some(file_name) = settings.override_config_file() {
            sources.push(workspace_root.join(file_name));
        }

        for path in &sources {
            let Some(config) = read_config_file(path)? else {
                continue;
            };
            let Some(options) = config.compiler_options else {
                continue;
            };
            if let Some(paths) = options.paths() {
                mapping = Some(AliasMapping::from_paths(paths));
            }
            if let Some(base_url) = options.base_url() {
                base_dir = Some(workspace_root.join(base_url));
            }
        }

        let table = AliasTable::new(mapping, base_dir);
        debug!(
            root = %workspace_root.display(),
            entries = table.mapping.as_ref().map_or(0, AliasMapping::len),
            base_dir = ?table.base_dir,
            prefixes = table.prefixes.len(),
            "loaded alias table"
        );
        Ok(table)
    }

    /// Alias-qualified import path for `declaring_file`, first matching
    /// `(alias, target)` pair in declaration order. `None` when the table is
    /// not configured or nothing matches.
    pub fn alias_path_for(&self, declaring_file: &Path) -> Option<String> {
        if !self.is_configured() {
            return None;
        }

        let declaring = normalize_path(declaring_file);
        for prefix in &self.prefixes {
            let Ok(suffix) = declaring.strip_prefix(&prefix.target_prefix) else {
                continue;
            };
            if suffix.as_os_str().is_empty() {
                continue;
            }
            let joined = format!("{}/{}", prefix.alias_base, to_forward_slashes(suffix));
            let alias_path = strip_ts_extension(&joined).to_string();
            trace!(
                file = %declaring.display(),
                target = %prefix.target_prefix.display(),
                alias_path = %alias_path,
                "alias prefix matched"
            );
            return Some(alias_path);
        }

        None
    }
}

fn build_prefixes(mapping: &AliasMapping, base_dir: &Path) -> Vec<AliasPrefix> {
    let mut prefixes = Vec::new();
    for entry in mapping.entries() {
        let Some(alias_base) = entry.alias_base() else {
            continue;
        };
        for target in entry.wildcard_targets() {
            prefixes.push(AliasPrefix {
                alias_base: alias_base.to_string(),
                target_prefix: normalize_path(&base_dir.join(target)),
            });
        }
    }
    prefixes
}

/// `Ok(None)` when the file is absent or unreadable.
fn read_config_file(path: &Path) -> Result<Option<TsConfig>, ConfigError> {
    if !path.is_file() {
        trace!(path = %path.display(), "configuration file not present");
        return Ok(None);
    }

    match load_tsconfig(path) {
        Ok(config) => Ok(Some(config)),
        Err(err) => {
            let error = classify_load_error(path, &err);
            if error.is_io() {
                warn!(error = %error, "treating unreadable configuration file as absent");
                return Ok(None);
            }
            Err(error)
        }
    }
}
