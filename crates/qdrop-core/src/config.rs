use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration (loaded from qdrop.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QdropConfig {
    pub store: StoreConfig,
    pub staging: StagingConfig,
    pub transfer: TransferConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Credential store file, one JSON record per line
    pub users_file: PathBuf,
    /// Session time-to-live in seconds (default: 900)
    pub session_ttl_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StagingConfig {
    /// Staging directory for `.enc` artifacts, created on startup if absent
    pub dir: PathBuf,
    /// Well-known key file; always holds only the most recently generated key
    pub key_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
    /// Hand staged artifacts to the remote collaborator (default: false,
    /// which reports every transfer as skipped)
    pub enabled: bool,
    /// S3-compatible endpoint
    pub endpoint: String,
    /// S3 region (default: us-east-1)
    pub region: String,
    /// Destination bucket
    pub bucket: String,
    /// Enforce HTTPS for the endpoint (error on HTTP when set)
    pub enforce_tls: bool,
    /// Upper bound on a single transfer attempt, in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level (default: info)
    pub level: String,
    /// Log format: "json" or "text"
    pub format: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            users_file: PathBuf::from("users.jsonl"),
            session_ttl_secs: 900,
        }
    }
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("uploads"),
            key_file: PathBuf::from("upload.key"),
        }
    }
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: "http://localhost:9000".into(),
            region: "us-east-1".into(),
            bucket: "qdrop".into(),
            enforce_tls: false,
            timeout_secs: 60,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

impl QdropConfig {
    /// Load from a TOML file, falling back to defaults (with a warning) when
    /// the file does not exist.
    pub fn load(path: &Path) -> crate::error::QdropResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| {
                crate::error::QdropError::Config(format!("parsing {}: {e}", path.display()))
            })
        } else {
            tracing::warn!(
                "config file not found: {}  (using defaults)",
                path.display()
            );
            Ok(Self::default())
        }
    }
}
