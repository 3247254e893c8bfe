//! Append-only credential store: register and authenticate

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use qdrop_core::{QdropError, QdropResult};

/// One registered user, as persisted. The password is stored only as an
/// Argon2id PHC hash string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub mobile: String,
}

/// Registration input. The password stays wrapped until it is hashed.
pub struct NewUser {
    pub username: String,
    pub password: SecretString,
    pub email: String,
    pub mobile: String,
}

/// File-backed credential store, one JSON record per line.
#[derive(Debug, Clone)]
pub struct UserStore {
    path: PathBuf,
}

impl UserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Register a new user: validate, reject duplicates, hash the password,
    /// append one record.
    pub fn register(&self, new_user: NewUser) -> QdropResult<()> {
        validate_non_empty("username", &new_user.username)?;
        validate_non_empty("email", &new_user.email)?;
        validate_non_empty("mobile", &new_user.mobile)?;
        if secrecy::ExposeSecret::expose_secret(&new_user.password).is_empty() {
            return Err(QdropError::Validation("password must not be empty".into()));
        }

        // Usernames are unique and case-sensitive.
        if self
            .records()?
            .iter()
            .any(|r| r.username == new_user.username)
        {
            return Err(QdropError::DuplicateUser(new_user.username));
        }

        let record = UserRecord {
            username: new_user.username,
            password_hash: qdrop_crypto::hash_password(&new_user.password)?,
            email: new_user.email,
            mobile: new_user.mobile,
        };

        let mut line = serde_json::to_string(&record)
            .map_err(|e| QdropError::Config(format!("encoding user record: {e}")))?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        file.sync_all()?;

        tracing::info!(username = %record.username, "user registered");
        Ok(())
    }

    /// Check a claimed (username, password) pair against the store.
    ///
    /// A missing store file means no user has ever registered: `Ok(false)`.
    /// A record that fails to parse is an error, not a skip.
    pub fn authenticate(&self, username: &str, password: &SecretString) -> QdropResult<bool> {
        if !self.path.exists() {
            return Ok(false);
        }

        for record in self.records()? {
            if record.username == username {
                return Ok(qdrop_crypto::verify_password(
                    password,
                    &record.password_hash,
                )?);
            }
        }
        Ok(false)
    }

    /// Read and parse every record. Missing file reads as empty.
    fn records(&self) -> QdropResult<Vec<UserRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)?;

        let mut records = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record: UserRecord =
                serde_json::from_str(line).map_err(|e| QdropError::CorruptRecord {
                    line: idx + 1,
                    reason: e.to_string(),
                })?;
            records.push(record);
        }
        Ok(records)
    }
}

fn validate_non_empty(field: &str, value: &str) -> QdropResult<()> {
    if value.trim().is_empty() {
        return Err(QdropError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}
