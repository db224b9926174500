//! SHA-256 content digests for change detection.

use std::path::Path;

use sha2::{Digest, Sha256};

/// Hex SHA-256 of the file's raw bytes.
///
/// Returns `None` when the file does not exist. Read failures on an existing
/// file are logged and also yield `None`; they never propagate.
pub fn hash_file(path: &Path) -> Option<String> {
    if !path.exists() {
        return None;
    }
    match std::fs::read(path) {
        Ok(bytes) => Some(hash_bytes(&bytes)),
        Err(err) => {
            tracing::warn!("failed to hash {}: {err}", path.display());
            None
        }
    }
}

/// Hex SHA-256 of `bytes`.
pub fn hash_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
