//! Error types for persisted data (settings file, score log)
//!
//! Nothing in the game treats these as fatal; callers log and fall back.

use std::path::PathBuf;

use thiserror::Error;

/// Failure reading or writing a file the game persists
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Underlying file I/O failed
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File contents were not valid JSON for the expected type
    #[error("Invalid JSON in '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl PersistenceError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    /// True when the file simply does not exist yet
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Result alias for persistence operations
pub type Result<T> = std::result::Result<T, PersistenceError>;
