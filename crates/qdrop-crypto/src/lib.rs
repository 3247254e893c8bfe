//! qdrop-crypto: cryptographic primitives for the secure upload pipeline
//!
//! Three concerns live here:
//! - per-upload symmetric keys (256-bit, CSPRNG, zeroized on drop)
//! - authenticated file sealing with XChaCha20-Poly1305
//!   (`[24-byte nonce][ciphertext][16-byte tag]`, AAD = source basename)
//! - Argon2id password hashing for the credential store
//!
//! Nothing in this crate touches the filesystem; key persistence and staging
//! I/O belong to qdrop-engine.

pub mod keys;
pub mod password;
pub mod seal;

pub use keys::{generate_upload_key, UploadKey};
pub use password::{hash_password, verify_password};
pub use seal::{open_bytes, seal_bytes};

/// Size of an upload key in bytes (256-bit)
pub const KEY_SIZE: usize = 32;

/// Size of an XChaCha20-Poly1305 nonce (192-bit)
pub const NONCE_SIZE: usize = 24;

/// Size of a Poly1305 authentication tag
pub const TAG_SIZE: usize = 16;
