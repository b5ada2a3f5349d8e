//! File-system watcher that keeps a workspace's alias state current.
//!
//! Configuration changes reload the workspace; new or edited sources get
//! their alias path recorded. The event handling itself is [`handle_event`],
//! which does not depend on a live watcher.

use anyhow::{Context, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

use autoimport_resolver::{ChangeFilter, ChangeKind, WorkspaceRegistry};

/// What one event did to the registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchOutcome {
    pub reloaded: bool,
    pub recorded: usize,
}

/// Apply `event` to the workspace at `workspace_root`.
///
/// At most one reload happens per event, however many configuration paths it
/// carries. Access events are ignored; removals only matter for
/// configuration files.
pub fn handle_event(
    registry: &WorkspaceRegistry,
    filter: &ChangeFilter,
    workspace_root: &Path,
    event: &Event,
) -> WatchOutcome {
    let mut outcome = WatchOutcome::default();
    let is_removal = match event.kind {
        EventKind::Access(_) => return outcome,
        EventKind::Remove(_) => true,
        _ => false,
    };

    let mut config_changed = false;
    let mut sources = Vec::new();
    for path in &event.paths {
        match filter.classify(workspace_root, path) {
            ChangeKind::Config => config_changed = true,
            ChangeKind::Source if !is_removal => sources.push(path),
            ChangeKind::Source | ChangeKind::Ignored => {}
        }
    }

    if config_changed {
        debug!(root = %workspace_root.display(), kind = ?event.kind, "configuration changed");
        // Failures are logged by the workspace; the previous table stays live.
        outcome.reloaded = registry.reload(workspace_root).is_ok();
    }

    if sources.is_empty() {
        return outcome;
    }
    let workspace = registry.workspace(workspace_root);
    for path in sources {
        if workspace.record_discovered_file(path).is_some() {
            outcome.recorded += 1;
        }
    }
    outcome
}

/// Live watcher for one workspace folder. Dropping it stops watching.
pub struct WorkspaceWatcher {
    root: PathBuf,
    _watcher: RecommendedWatcher,
}

impl WorkspaceWatcher {
    pub fn start(registry: Arc<WorkspaceRegistry>, root: &Path) -> Result<Self> {
        let root = registry.workspace(root).root().to_path_buf();
        let mut filter = ChangeFilter::new(&registry.settings())
            .context("failed to build workspace change filter")?;
        let mut filter_override = registry.settings().override_config_file().map(str::to_string);

        let handler_root = root.clone();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(err) => {
                    warn!(root = %handler_root.display(), error = %err, "watch error");
                    return;
                }
            };

            // The override filename can change through settings updates.
            let settings = registry.settings();
            let current_override = settings.override_config_file().map(str::to_string);
            if current_override != filter_override {
                match ChangeFilter::new(&settings) {
                    Ok(rebuilt) => {
                        filter = rebuilt;
                        filter_override = current_override;
                    }
                    Err(err) => warn!(error = %err, "failed to rebuild change filter"),
                }
            }

            handle_event(&registry, &filter, &handler_root, &event);
        })
        .context("failed to create file watcher")?;

        watcher
            .watch(&root, RecursiveMode::Recursive)
            .with_context(|| format!("failed to watch {}", root.display()))?;
        debug!(root = %root.display(), "watching workspace");

        Ok(WorkspaceWatcher {
            root,
            _watcher: watcher,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl std::fmt::Debug for WorkspaceWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkspaceWatcher")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}
