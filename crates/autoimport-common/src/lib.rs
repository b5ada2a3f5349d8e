//! Common utilities for the autoimport crates.
//!
//! This crate provides foundational pieces used across the workspace:
//! - Lexical path handling (`normalize_path`, `relative_path`, `to_forward_slashes`)
//! - Module-specifier extension stripping
//! - Centralized limits

// Centralized limits and thresholds
pub mod limits;

// Lexical path helpers shared by config loading and import resolution
pub mod paths;
pub use paths::{
    TS_EXTENSION, normalize_path, relative_path, strip_module_extension, strip_ts_extension,
    to_forward_slashes,
};
