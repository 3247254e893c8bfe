use std::path::PathBuf;
use thiserror::Error;

pub type QdropResult<T> = Result<T, QdropError>;

#[derive(Debug, Error)]
pub enum QdropError {
    /// A required field was empty or otherwise rejected before any core
    /// operation ran.
    #[error("validation error: {0}")]
    Validation(String),

    #[error("user already registered: {0}")]
    DuplicateUser(String),

    /// A credential store line failed to parse. Surfaced immediately rather
    /// than skipped, so store corruption is visible at authentication time.
    #[error("corrupt credential record at line {line}: {reason}")]
    CorruptRecord { line: usize, reason: String },

    #[error("source file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("staging write failed: {0}")]
    WriteFailed(String),

    #[error("crypto error: {0}")]
    Crypto(String),

    #[error("transfer error: {0}")]
    Transfer(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
