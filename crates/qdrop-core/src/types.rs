use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::SystemTime;

/// An encrypted file sitting in the staging directory, pending transfer.
///
/// Persists on disk until an external process consumes or deletes it; qdrop
/// does not clean up staged artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StagedArtifact {
    /// Basename of the plaintext source file.
    pub source_name: String,
    /// Path of the `<source_name>.enc` blob in the staging directory.
    pub ciphertext_path: PathBuf,
    pub created_at: SystemTime,
}

/// Phase of a single upload request.
///
/// One instance per request; the three transfer outcomes are terminal and a
/// new request starts over from `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadPhase {
    Idle,
    KeyGenerated,
    Encrypted,
    Staged,
    TransferSucceeded,
    TransferFailed,
    TransferSkipped,
}

impl UploadPhase {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            UploadPhase::TransferSucceeded
                | UploadPhase::TransferFailed
                | UploadPhase::TransferSkipped
        )
    }
}

/// Result of the hand-off to the remote transfer collaborator.
///
/// `Skipped` means the transfer step is disabled by config; it is reported
/// distinctly from success and failure rather than collapsed into either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferOutcome {
    Succeeded,
    Failed { reason: String },
    Skipped,
}

impl TransferOutcome {
    pub fn phase(&self) -> UploadPhase {
        match self {
            TransferOutcome::Succeeded => UploadPhase::TransferSucceeded,
            TransferOutcome::Failed { .. } => UploadPhase::TransferFailed,
            TransferOutcome::Skipped => UploadPhase::TransferSkipped,
        }
    }
}
