//! Centralized limits for filesystem walks.
//!
//! Every loop that follows the filesystem (upward directory walks, `extends`
//! chains, workspace scans) is bounded by one of these constants so that a
//! pathological tree (symlink cycles, absurdly deep nesting) cannot hang the
//! host editor.

/// Maximum number of directories visited by an upward boundary walk.
///
/// The walk normally stops at the workspace root. This cap only matters for
/// files outside the workspace or trees where the root is never reached.
///
/// # Example
///
/// ```text
/// /ws/apps/web/src/components/button/index.ts
///     -> /ws/apps/web/src/components/button
///     -> /ws/apps/web/src/components
///     -> /ws/apps/web/src                 (no tsconfig.json)
///     -> /ws/apps/web                     (tsconfig.json found, stop)
/// ```
pub const MAX_BOUNDARY_WALK_DEPTH: usize = 256;

/// Maximum length of a tsconfig `extends` chain.
///
/// Cycles are detected separately; this caps long acyclic chains.
pub const MAX_EXTENDS_DEPTH: usize = 32;

/// Maximum directory depth followed by the discovery scan.
pub const MAX_SCAN_DEPTH: usize = 64;
