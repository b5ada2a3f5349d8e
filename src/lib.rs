//! Import-path resolution for TypeScript auto-import tooling.
//!
//! Hosts hold one [`WorkspaceRegistry`], ask it to resolve
//! `(declaring file, consuming file)` pairs, and feed it file-system changes
//! through [`watch::WorkspaceWatcher`] (or [`watch::handle_event`] when they
//! own the watcher).

pub use autoimport_common as common;
pub use autoimport_config as config;
pub use autoimport_resolver as resolver;

pub use autoimport_config::{AliasTable, AutoImportSettings, ConfigError};
pub use autoimport_resolver::{
    ExportCatalog, ImportCandidate, ImportStyle, ImportSuggestion, Resolution, WorkspaceRegistry,
    missing_name, render_import_statement, scan_workspace,
};

// Tracing configuration (text / tree / JSON output on stderr)
pub mod tracing_config;
pub use tracing_config::init_tracing;

// notify-backed change forwarding
pub mod watch;
pub use watch::{WatchOutcome, WorkspaceWatcher};
#[cfg(test)]
#[path = "tests/watch_tests.rs"]
mod watch_tests;
