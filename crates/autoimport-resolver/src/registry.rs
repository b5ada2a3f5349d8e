//! Per-workspace alias state.
//!
//! Each workspace folder owns one [`WorkspaceSnapshot`]: the alias table and
//! the cache computed from it. Reloading builds a fresh snapshot and swaps the
//! `Arc` under a write lock, so a reader sees either the old table and cache
//! or the new pair, never a mixture. Readers that cloned the old `Arc` before
//! the swap keep resolving against it until they finish.
//!
//! Reloads of one workspace are serialized, and the settings are read once
//! the reload holds its lock, so the last reload to finish always reflects
//! the latest settings.

use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tracing::{debug, warn};

use autoimport_common::normalize_path;
use autoimport_config::{AliasTable, AutoImportSettings, ConfigError};

use crate::cache::ResolvedImportCache;
use crate::resolver::{ImportResolver, Resolution};

/// Alias table plus the cache derived from it, from a single load pass.
#[derive(Debug, Default)]
pub struct WorkspaceSnapshot {
    table: AliasTable,
    cache: ResolvedImportCache,
    generation: u64,
}

impl WorkspaceSnapshot {
    fn new(table: AliasTable, generation: u64) -> Self {
        WorkspaceSnapshot {
            table,
            cache: ResolvedImportCache::new(),
            generation,
        }
    }

    pub fn table(&self) -> &AliasTable {
        &self.table
    }

    pub fn cache(&self) -> &ResolvedImportCache {
        &self.cache
    }

    /// Number of successful loads before this one.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn resolver(&self) -> ImportResolver<'_> {
        ImportResolver::new(&self.table).with_cache(&self.cache)
    }
}

#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
    snapshot: RwLock<Arc<WorkspaceSnapshot>>,
    next_generation: AtomicU64,
    reload_lock: Mutex<()>,
}

impl Workspace {
    /// Load the alias table for `root`. A configuration that fails to parse
    /// is logged and leaves the table empty.
    pub fn load(root: &Path, settings: &AutoImportSettings) -> Self {
        let root = normalize_path(root);
        let table = match AliasTable::load(&root, settings) {
            Ok(table) => table,
            Err(error) => {
                warn!(
                    root = %root.display(),
                    error = %error,
                    "failed to load alias configuration, continuing without aliases"
                );
                AliasTable::default()
            }
        };

        Workspace {
            snapshot: RwLock::new(Arc::new(WorkspaceSnapshot::new(table, 0))),
            root,
            next_generation: AtomicU64::new(1),
            reload_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Current snapshot. Hold on to it for a consistent view across calls.
    pub fn snapshot(&self) -> Arc<WorkspaceSnapshot> {
        let guard = self.snapshot.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Rebuild the alias table and swap it in together with an empty cache.
    ///
    /// On a parse failure the previous snapshot stays in place and the error
    /// is returned after being logged.
    pub fn reload(&self, settings: &AutoImportSettings) -> Result<(), ConfigError> {
        self.reload_with(|| settings.clone())
    }

    /// Like [`Workspace::reload`], with `settings` read after concurrent
    /// reloads of this workspace have finished.
    pub fn reload_with<F>(&self, settings: F) -> Result<(), ConfigError>
    where
        F: FnOnce() -> AutoImportSettings,
    {
        let _serialized = self
            .reload_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let settings = settings();
        let table = match AliasTable::load(&self.root, &settings) {
            Ok(table) => table,
            Err(error) => {
                warn!(
                    root = %self.root.display(),
                    error = %error,
                    "alias configuration reload failed, keeping previous table"
                );
                return Err(error);
            }
        };

        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst);
        let fresh = Arc::new(WorkspaceSnapshot::new(table, generation));
        let mut guard = self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = fresh;
        drop(guard);

        debug!(root = %self.root.display(), generation, "alias table reloaded");
        Ok(())
    }

    pub fn resolve_import_path(&self, declaring_file: &Path, consuming_file: &Path) -> Resolution {
        let snapshot = self.snapshot();
        snapshot
            .resolver()
            .resolve(declaring_file, consuming_file, &self.root)
    }

    /// Compute the alias path of a newly seen file and remember it.
    pub fn record_discovered_file(&self, declaring_file: &Path) -> Option<String> {
        let snapshot = self.snapshot();
        let alias_path = snapshot.table().alias_path_for(declaring_file)?;
        snapshot.cache().insert(declaring_file, alias_path.clone());
        Some(alias_path)
    }
}

/// All open workspace folders, keyed by normalized root.
#[derive(Debug)]
pub struct WorkspaceRegistry {
    settings: RwLock<AutoImportSettings>,
    workspaces: DashMap<PathBuf, Arc<Workspace>>,
}

impl Default for WorkspaceRegistry {
    fn default() -> Self {
        Self::new(AutoImportSettings::default())
    }
}

impl WorkspaceRegistry {
    pub fn new(settings: AutoImportSettings) -> Self {
        WorkspaceRegistry {
            settings: RwLock::new(settings),
            workspaces: DashMap::new(),
        }
    }

    pub fn settings(&self) -> AutoImportSettings {
        self.settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Existing workspace for `root`, or a freshly loaded one.
    pub fn workspace(&self, root: &Path) -> Arc<Workspace> {
        let key = normalize_path(root);
        if let Some(existing) = self.workspaces.get(&key) {
            return Arc::clone(existing.value());
        }

        // Load outside the map lock; a concurrent loser's table is discarded.
        let loaded = Arc::new(Workspace::load(&key, &self.settings()));
        let entry = self.workspaces.entry(key).or_insert(loaded);
        Arc::clone(entry.value())
    }

    pub fn get(&self, root: &Path) -> Option<Arc<Workspace>> {
        self.workspaces
            .get(&normalize_path(root))
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Workspace with the longest root that contains `file`.
    pub fn workspace_for_file(&self, file: &Path) -> Option<Arc<Workspace>> {
        let file = normalize_path(file);
        self.workspaces
            .iter()
            .filter(|entry| file.starts_with(entry.key()))
            .max_by_key(|entry| entry.key().components().count())
            .map(|entry| Arc::clone(entry.value()))
    }

    pub fn roots(&self) -> Vec<PathBuf> {
        self.workspaces.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn remove_workspace(&self, root: &Path) -> bool {
        self.workspaces.remove(&normalize_path(root)).is_some()
    }

    pub fn reload(&self, root: &Path) -> Result<(), ConfigError> {
        self.workspace(root).reload_with(|| self.settings())
    }

    /// Reload every known workspace. Failures are logged per workspace and
    /// the first one is returned.
    pub fn reload_all(&self) -> Result<(), ConfigError> {
        let workspaces: Vec<Arc<Workspace>> = self
            .workspaces
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();

        let mut first_error = None;
        for workspace in workspaces {
            if let Err(error) = workspace.reload_with(|| self.settings()) {
                first_error.get_or_insert(error);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Replace the host settings and reload every workspace with them.
    pub fn update_settings(&self, settings: AutoImportSettings) -> Result<(), ConfigError> {
        *self
            .settings
            .write()
            .unwrap_or_else(PoisonError::into_inner) = settings;
        self.reload_all()
    }

    pub fn resolve_import_path(
        &self,
        declaring_file: &Path,
        consuming_file: &Path,
        workspace_root: &Path,
    ) -> Resolution {
        self.workspace(workspace_root)
            .resolve_import_path(declaring_file, consuming_file)
    }

    pub fn record_discovered_file(&self, workspace_root: &Path, file: &Path) -> Option<String> {
        self.workspace(workspace_root).record_discovered_file(file)
    }
}
