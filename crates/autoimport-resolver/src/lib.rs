//! Import-path resolution for TypeScript workspaces.
//!
//! - Nearest sub-project (`tsconfig.json`) boundary search (`boundary`)
//! - Relative-or-alias resolution (`resolver`) and its cache (`cache`)
//! - Per-workspace state with atomic reload (`registry`)
//! - Workspace scanning and change classification (`discovery`, `watch_filter`)
//! - Host-facing helpers: suggestions, diagnostics, statement rendering

pub mod boundary;
pub use boundary::{boundary_for_file, find_nearest_boundary};

pub mod cache;
pub use cache::ResolvedImportCache;

pub mod resolver;
pub use resolver::{ImportResolver, Resolution, relative_module_specifier, resolve_import_path};

pub mod registry;
pub use registry::{Workspace, WorkspaceRegistry, WorkspaceSnapshot};

pub mod discovery;
pub use discovery::{collect_sources, is_exportable_source, scan_workspace};

pub mod watch_filter;
pub use watch_filter::{ChangeFilter, ChangeKind};

pub mod candidates;
pub use candidates::{ExportCatalog, ImportCandidate, ImportSuggestion};

pub mod diagnostics;
pub use diagnostics::missing_name;

pub mod statement;
pub use statement::{ImportStyle, render_import_statement};

#[cfg(test)]
#[path = "tests/registry_tests.rs"]
mod registry_tests;
#[cfg(test)]
#[path = "tests/candidates_tests.rs"]
mod candidates_tests;
