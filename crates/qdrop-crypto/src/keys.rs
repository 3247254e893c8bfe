//! One-time upload keys: generated fresh per upload request

use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroize;

use crate::KEY_SIZE;

/// A 256-bit symmetric key covering exactly one upload. Zeroized on drop.
#[derive(Clone)]
pub struct UploadKey {
    bytes: [u8; KEY_SIZE],
}

impl UploadKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl Drop for UploadKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for UploadKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Generate a random 256-bit upload key from the OS entropy source.
pub fn generate_upload_key() -> UploadKey {
    let mut bytes = [0u8; KEY_SIZE];
    OsRng.fill_bytes(&mut bytes);
    UploadKey::from_bytes(bytes)
}
