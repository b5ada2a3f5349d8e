//! Configuration for autoimport.
//!
//! - tsconfig JSONC parsing with `extends` (`tsconfig`)
//! - Host settings (`settings`)
//! - The per-workspace alias table built from `compilerOptions.paths` and
//!   `compilerOptions.baseUrl` (`alias`)

pub mod alias;
pub use alias::{
    AliasEntry, AliasMapping, AliasPrefix, AliasTable, TSCONFIG_FILE_NAME, WILDCARD,
};

pub mod error;
pub use error::ConfigError;

pub mod settings;
pub use settings::AutoImportSettings;

pub mod tsconfig;
pub use tsconfig::{CompilerOptions, PathsMap, TsConfig, load_tsconfig, parse_tsconfig};

#[cfg(test)]
#[path = "tests/tsconfig_tests.rs"]
mod tsconfig_tests;
#[cfg(test)]
#[path = "tests/alias_table_tests.rs"]
mod alias_table_tests;
