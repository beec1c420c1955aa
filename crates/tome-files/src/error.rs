//! Error types for file discovery and copying.

use std::path::PathBuf;

/// Error raised while discovering or copying files.
#[derive(Debug, thiserror::Error)]
pub enum FilesError {
    /// Filesystem failure; discovery cannot continue past it.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        /// Path being read, listed or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// An exclude or theme filter pattern failed to compile.
    #[error("Invalid pattern '{pattern}': {source}")]
    Pattern {
        /// Pattern as written in configuration.
        pattern: String,
        /// Underlying error.
        #[source]
        source: glob::PatternError,
    },
}

impl FilesError {
    /// Create an I/O error with path context.
    #[must_use]
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Underlying I/O error kind, if this is an I/O failure.
    #[must_use]
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            Self::Io { source, .. } => Some(source.kind()),
            Self::Pattern { .. } => None,
        }
    }
}
