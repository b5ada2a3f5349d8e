//! Classification of file-system changes inside a workspace.
//!
//! A change to any `tsconfig.json`, to a `tsconfig.*.json`, or to the
//! configured override file invalidates the alias table (and the boundary
//! layout). A new or changed source file only needs its alias path recorded.

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::Path;

use autoimport_common::{normalize_path, to_forward_slashes};
use autoimport_config::AutoImportSettings;

const CONFIG_GLOBS: &[&str] = &["**/tsconfig.json", "**/tsconfig.*.json"];
const SOURCE_GLOBS: &[&str] = &["**/*.ts", "**/*.tsx"];
const EXCLUDED_GLOBS: &[&str] = &["**/*.d.ts", "**/node_modules/**"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// Reload the workspace.
    Config,
    /// Record the file's alias path.
    Source,
    Ignored,
}

#[derive(Debug, Clone)]
pub struct ChangeFilter {
    config: GlobSet,
    sources: GlobSet,
    excluded: GlobSet,
    override_file: Option<String>,
}

fn glob(pattern: &str) -> Result<Glob, globset::Error> {
    GlobBuilder::new(pattern).literal_separator(true).build()
}

fn build_set(patterns: &[&str]) -> Result<GlobSet, globset::Error> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(glob(pattern)?);
    }
    builder.build()
}

impl ChangeFilter {
    pub fn new(settings: &AutoImportSettings) -> Result<Self, globset::Error> {
        Ok(ChangeFilter {
            config: build_set(CONFIG_GLOBS)?,
            sources: build_set(SOURCE_GLOBS)?,
            excluded: build_set(EXCLUDED_GLOBS)?,
            override_file: settings
                .override_config_file()
                .map(|file| to_forward_slashes(&normalize_path(Path::new(file)))),
        })
    }

    /// Classify `path` relative to `workspace_root`. Paths outside the root
    /// are ignored.
    pub fn classify(&self, workspace_root: &Path, path: &Path) -> ChangeKind {
        let root = normalize_path(workspace_root);
        let path = normalize_path(path);
        let Ok(relative) = path.strip_prefix(&root) else {
            return ChangeKind::Ignored;
        };
        let relative = to_forward_slashes(relative);
        if relative.is_empty() {
            return ChangeKind::Ignored;
        }

        if self.override_file.as_deref() == Some(relative.as_str())
            || self.config.is_match(&relative)
        {
            return ChangeKind::Config;
        }
        if self.excluded.is_match(&relative) {
            return ChangeKind::Ignored;
        }
        if self.sources.is_match(&relative) {
            return ChangeKind::Source;
        }
        ChangeKind::Ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(override_file: Option<&str>) -> ChangeFilter {
        let mut settings = AutoImportSettings::default();
        if let Some(file) = override_file {
            settings = settings.with_override_config_file(file);
        }
        ChangeFilter::new(&settings).unwrap()
    }

    #[test]
    fn config_files_anywhere_trigger_reload() {
        let filter = filter(None);
        let root = Path::new("/ws");
        assert_eq!(filter.classify(root, Path::new("/ws/tsconfig.json")), ChangeKind::Config);
        assert_eq!(
            filter.classify(root, Path::new("/ws/libs/ui/tsconfig.json")),
            ChangeKind::Config
        );
        assert_eq!(
            filter.classify(root, Path::new("/ws/tsconfig.base.json")),
            ChangeKind::Config
        );
        assert_eq!(
            filter.classify(root, Path::new("/ws/jsconfig.json")),
            ChangeKind::Ignored
        );
    }

    #[test]
    fn override_file_triggers_reload() {
        let filter = filter(Some("./configs/paths.json"));
        assert_eq!(
            filter.classify(Path::new("/ws"), Path::new("/ws/configs/paths.json")),
            ChangeKind::Config
        );
        assert_eq!(
            filter.classify(Path::new("/ws"), Path::new("/ws/other/configs/paths.json")),
            ChangeKind::Ignored
        );
    }

    #[test]
    fn sources_and_exclusions() {
        let filter = filter(None);
        let root = Path::new("/ws");
        assert_eq!(filter.classify(root, Path::new("/ws/src/a.ts")), ChangeKind::Source);
        assert_eq!(filter.classify(root, Path::new("/ws/b.tsx")), ChangeKind::Source);
        assert_eq!(
            filter.classify(root, Path::new("/ws/src/types.d.ts")),
            ChangeKind::Ignored
        );
        assert_eq!(
            filter.classify(root, Path::new("/ws/node_modules/pkg/index.ts")),
            ChangeKind::Ignored
        );
        assert_eq!(filter.classify(root, Path::new("/ws/src/a.js")), ChangeKind::Ignored);
        assert_eq!(filter.classify(root, Path::new("/elsewhere/a.ts")), ChangeKind::Ignored);
    }
}
