use dashmap::DashMap;
use std::path::{Path, PathBuf};

use autoimport_common::normalize_path;

/// Declaring file -> alias-qualified import path, for one workspace.
///
/// Entries are only ever added. Invalidation happens by replacing the whole
/// cache together with the alias table it was computed from.
#[derive(Debug, Default)]
pub struct ResolvedImportCache {
    entries: DashMap<PathBuf, String>,
}

impl ResolvedImportCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, declaring_file: &Path) -> Option<String> {
        self.entries
            .get(&normalize_path(declaring_file))
            .map(|entry| entry.value().clone())
    }

    /// Record `alias_path` unless the file already has an entry.
    pub fn insert(&self, declaring_file: &Path, alias_path: String) {
        self.entries
            .entry(normalize_path(declaring_file))
            .or_insert(alias_path);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_are_normalized() {
        let cache = ResolvedImportCache::new();
        cache.insert(Path::new("/ws/shared/./util.ts"), "@shared/util".to_string());

        assert_eq!(
            cache.get(Path::new("/ws/shared/util.ts")),
            Some("@shared/util".to_string())
        );
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn existing_entries_are_kept() {
        let cache = ResolvedImportCache::new();
        cache.insert(Path::new("/ws/a.ts"), "@a/a".to_string());
        cache.insert(Path::new("/ws/a.ts"), "@b/a".to_string());

        assert_eq!(cache.get(Path::new("/ws/a.ts")), Some("@a/a".to_string()));
    }
}
