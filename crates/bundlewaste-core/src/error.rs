//! Error types for duplicate detection.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a duplicate-detection pass.
///
/// Unreadable walk entries are not errors; they are skipped and counted.
#[derive(Debug, Error)]
pub enum DetectError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The analyzed root is a file or special entry.
    #[error("Bundle root is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// The hashing worker pool could not be created.
    #[error("Failed to build hashing thread pool: {message}")]
    ThreadPool { message: String },
}

impl DetectError {
    /// Wrap an I/O error, keeping the offending path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// Path the error refers to, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::PermissionDenied { path }
            | Self::NotFound { path }
            | Self::Io { path, .. }
            | Self::NotADirectory { path } => Some(path),
            Self::InvalidConfig { .. } | Self::ThreadPool { .. } => None,
        }
    }
}
