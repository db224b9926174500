//! Error types for jdksync-sync.

use std::path::PathBuf;

use thiserror::Error;

use jdksync_core::{RegistryError, TableError};

/// All errors that can arise from compare / reconcile / marker operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The JDK table file could not be read or parsed.
    #[error("table error: {0}")]
    Table(#[from] TableError),

    /// An error from the live registry.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
