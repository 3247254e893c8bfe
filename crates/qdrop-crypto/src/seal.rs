//! Whole-file XChaCha20-Poly1305 sealing
//!
//! Sealed blob format (binary):
//! ```text
//! [24 bytes: random nonce][N bytes: ciphertext][16 bytes: Poly1305 tag]
//! AAD = source basename (UTF-8 bytes)
//! ```
//!
//! Binding the source basename as AAD means a staged blob renamed to another
//! source's `.enc` slot fails authentication instead of decrypting under the
//! wrong identity.

use chacha20poly1305::{
    aead::{Aead, KeyInit, Payload},
    XChaCha20Poly1305, XNonce,
};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::keys::UploadKey;
use crate::{NONCE_SIZE, TAG_SIZE};

/// Seal plaintext under a one-time upload key.
///
/// Returns: `[24-byte nonce][ciphertext][16-byte tag]`
pub fn seal_bytes(key: &UploadKey, basename: &str, plaintext: &[u8]) -> anyhow::Result<Vec<u8>> {
    let cipher = XChaCha20Poly1305::new(key.as_bytes().into());

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = XNonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(
            nonce,
            Payload {
                msg: plaintext,
                aad: basename.as_bytes(),
            },
        )
        .map_err(|e| anyhow::anyhow!("sealing failed: {e}"))?;

    let mut result = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    result.extend_from_slice(&nonce_bytes);
    result.extend_from_slice(&ciphertext);
    Ok(result)
}

/// Open a sealed blob produced by [`seal_bytes`].
///
/// `basename` must match what was used during sealing. Fails on any key,
/// AAD, or ciphertext mismatch rather than producing corrupted plaintext.
pub fn open_bytes(key: &UploadKey, basename: &str, sealed: &[u8]) -> anyhow::Result<Vec<u8>> {
    if sealed.len() < NONCE_SIZE + TAG_SIZE {
        anyhow::bail!(
            "sealed blob too short: {} bytes (minimum {})",
            sealed.len(),
            NONCE_SIZE + TAG_SIZE
        );
    }

    let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_SIZE);
    let nonce = XNonce::from_slice(nonce_bytes);
    let cipher = XChaCha20Poly1305::new(key.as_bytes().into());

    cipher
        .decrypt(
            nonce,
            Payload {
                msg: ciphertext,
                aad: basename.as_bytes(),
            },
        )
        .map_err(|_| {
            anyhow::anyhow!("opening failed: invalid key, corrupted blob, or wrong source name")
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::generate_upload_key;

    #[test]
    fn test_seal_open_roundtrip() {
        let key = generate_upload_key();
        let plaintext = b"hello, staged world!";

        let sealed = seal_bytes(&key, "notes.txt", plaintext).unwrap();
        let opened = open_bytes(&key, "notes.txt", &sealed).unwrap();

        assert_eq!(&opened, plaintext);
        assert_ne!(&sealed[NONCE_SIZE..], plaintext.as_slice());
    }

    #[test]
    fn test_seal_open_empty() {
        let key = generate_upload_key();

        let sealed = seal_bytes(&key, "empty.txt", b"").unwrap();
        assert_eq!(sealed.len(), NONCE_SIZE + TAG_SIZE);

        let opened = open_bytes(&key, "empty.txt", &sealed).unwrap();
        assert_eq!(opened, b"");
    }

    #[test]
    fn test_open_wrong_key() {
        let key1 = generate_upload_key();
        let key2 = generate_upload_key();

        let sealed = seal_bytes(&key1, "notes.txt", b"secret data").unwrap();
        let result = open_bytes(&key2, "notes.txt", &sealed);

        assert!(result.is_err(), "wrong key must fail authentication");
    }

    #[test]
    fn test_open_wrong_basename() {
        let key = generate_upload_key();

        let sealed = seal_bytes(&key, "notes.txt", b"secret data").unwrap();
        let result = open_bytes(&key, "other.txt", &sealed);

        assert!(result.is_err(), "wrong basename must fail (AAD mismatch)");
    }

    #[test]
    fn test_tampered_ciphertext() {
        let key = generate_upload_key();

        let mut sealed = seal_bytes(&key, "notes.txt", b"secret data").unwrap();
        // Flip a byte in the ciphertext (after nonce)
        sealed[NONCE_SIZE + 1] ^= 0xFF;

        let result = open_bytes(&key, "notes.txt", &sealed);
        assert!(result.is_err(), "tampered ciphertext must fail");
    }

    #[test]
    fn test_sealed_size() {
        let key = generate_upload_key();
        let plaintext = vec![0u8; 1000];

        let sealed = seal_bytes(&key, "blob.bin", &plaintext).unwrap();

        // nonce (24) + plaintext (1000) + tag (16) = 1040
        assert_eq!(sealed.len(), NONCE_SIZE + 1000 + TAG_SIZE);
    }

    #[test]
    fn test_truncated_blob() {
        let key = generate_upload_key();
        let result = open_bytes(&key, "x", &[0u8; NONCE_SIZE + TAG_SIZE - 1]);
        assert!(result.is_err());
    }
}
