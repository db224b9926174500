//! Timestamp marker files written next to the JDK table.
//!
//! `<table>.health_check.txt` proves the loop is alive;
//! `<table>.updated.txt` records the last successful reconciliation.

use std::path::PathBuf;

use jdksync_core::{table, Project};

use crate::error::{io_err, SyncError};

/// Write `content` to `<table file>.<suffix>.txt` and return its path.
///
/// Failures are logged and returned to the caller.
pub fn write_marker(project: &Project, suffix: &str, content: &str) -> Result<PathBuf, SyncError> {
    let path = table::marker_path(project, suffix);
    if let Err(err) = std::fs::write(&path, content) {
        tracing::error!("failed to write marker {}: {err}", path.display());
        return Err(io_err(path, err));
    }
    Ok(path)
}

/// Write the current timestamp under `suffix`.
pub fn stamp(project: &Project, suffix: &str) -> Result<PathBuf, SyncError> {
    write_marker(project, suffix, &table::timestamp_now())
}
