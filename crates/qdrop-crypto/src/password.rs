//! Argon2id password hashing for the credential store
//!
//! Registration stores a PHC-format hash string (algorithm, parameters,
//! salt, and digest); the plaintext password never reaches disk.
//! Verification is delegated to the argon2 verifier, which compares digests
//! in constant time.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use secrecy::{ExposeSecret, SecretString};

/// Hash a password with Argon2id and a fresh random salt.
///
/// Returns the PHC string to persist in the user record.
pub fn hash_password(password: &SecretString) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.expose_secret().as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("password hashing failed: {e}"))?;
    Ok(hash.to_string())
}

/// Verify a claimed password against a stored PHC string.
///
/// Returns `Ok(false)` on mismatch; errors only when the stored string
/// itself is unparseable.
pub fn verify_password(password: &SecretString, stored: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(stored)
        .map_err(|e| anyhow::anyhow!("stored password hash is malformed: {e}"))?;
    Ok(Argon2::default()
        .verify_password(password.expose_secret().as_bytes(), &parsed)
        .is_ok())
}
