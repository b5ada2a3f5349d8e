use std::path::PathBuf;

/// Failure to turn a configuration file into alias data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The file exists but is not valid (JSONC) structured data.
    Parse {
        /// Configuration file that failed to parse
        path: PathBuf,
        /// Parser message, including the `extends` chain when relevant
        message: String,
    },
    /// The file could not be read (permissions, transient I/O).
    Io {
        /// Configuration file that could not be read
        path: PathBuf,
        /// Underlying I/O error message
        message: String,
    },
    /// `extends` references loop back on themselves (or nest absurdly deep).
    ExtendsCycle {
        /// File at which the cycle was detected
        path: PathBuf,
    },
}

impl ConfigError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            ConfigError::Parse { path, .. }
            | ConfigError::Io { path, .. }
            | ConfigError::ExtendsCycle { path } => path,
        }
    }

    /// Filesystem failures are recovered by treating the file as absent.
    pub fn is_io(&self) -> bool {
        matches!(self, ConfigError::Io { .. })
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Parse { path, message } => {
                write!(f, "invalid configuration in {}: {}", path.display(), message)
            }
            ConfigError::Io { path, message } => {
                write!(f, "failed to read {}: {}", path.display(), message)
            }
            ConfigError::ExtendsCycle { path } => {
                write!(f, "tsconfig extends cycle detected at {}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {}
