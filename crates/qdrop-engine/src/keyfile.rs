//! The well-known key file
//!
//! A single raw 32-byte blob at a fixed path, rewritten on every upload.
//! Only the most recently generated key is retained, so only the most
//! recently staged artifact remains decryptable from this file. That
//! retention rule is deliberate and load-bearing; see DESIGN.md before
//! changing it to a key-per-artifact layout.

use std::path::{Path, PathBuf};

use qdrop_core::{QdropError, QdropResult};
use qdrop_crypto::{UploadKey, KEY_SIZE};

/// Write the key, replacing whatever key was there before.
///
/// Writes a sibling temp file and renames it over the key path, so the swap
/// is atomic: a crash mid-write leaves the previous key intact, never a
/// truncated file.
pub fn persist_key(path: &Path, key: &UploadKey) -> QdropResult<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    std::fs::write(&tmp, key.as_bytes()).map_err(|e| {
        QdropError::WriteFailed(format!("writing key file {}: {e}", tmp.display()))
    })?;
    std::fs::rename(&tmp, path).map_err(|e| {
        QdropError::WriteFailed(format!("replacing key file {}: {e}", path.display()))
    })?;
    tracing::debug!(key_file = %path.display(), "upload key persisted");
    Ok(())
}

/// Read back the currently retained key.
pub fn load_key(path: &Path) -> QdropResult<UploadKey> {
    let bytes = std::fs::read(path)?;
    let bytes: [u8; KEY_SIZE] = bytes.as_slice().try_into().map_err(|_| {
        QdropError::Crypto(format!(
            "key file {} holds {} bytes (expected {KEY_SIZE})",
            path.display(),
            bytes.len()
        ))
    })?;
    Ok(UploadKey::from_bytes(bytes))
}
