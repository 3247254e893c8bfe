//! Encrypt-and-stage pipeline: one request, one key, one staged artifact

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use qdrop_core::config::QdropConfig;
use qdrop_core::{QdropError, QdropResult, StagedArtifact, TransferOutcome, UploadPhase};
use qdrop_crypto::{generate_upload_key, seal_bytes, UploadKey};
use qdrop_users::Session;

/// Resolved filesystem locations the pipeline writes to.
#[derive(Debug, Clone)]
pub struct StagingPaths {
    pub staging_dir: PathBuf,
    pub key_file: PathBuf,
}

/// Resolve staging paths from config and create the staging directory if it
/// does not exist yet. Called once at startup.
pub fn prepare_staging(config: &QdropConfig) -> QdropResult<StagingPaths> {
    let paths = StagingPaths {
        staging_dir: config.staging.dir.clone(),
        key_file: config.staging.key_file.clone(),
    };
    std::fs::create_dir_all(&paths.staging_dir).map_err(|e| {
        QdropError::WriteFailed(format!(
            "creating staging dir {}: {e}",
            paths.staging_dir.display()
        ))
    })?;
    Ok(paths)
}

/// Encrypt one source file under `key` and stage the result.
///
/// Reads the whole file, seals it, writes `<staging_dir>/<basename>.enc`
/// (overwriting any previous artifact of the same name), and persists the
/// key to the well-known key file, replacing the prior key.
///
/// A missing source fails with `FileNotFound` before anything is written;
/// a failed staging write reports `WriteFailed`. One attempt, no retry.
pub fn encrypt_file(
    paths: &StagingPaths,
    source: &Path,
    key: &UploadKey,
) -> QdropResult<StagedArtifact> {
    if !source.is_file() {
        return Err(QdropError::FileNotFound(source.to_path_buf()));
    }
    let basename = source
        .file_name()
        .ok_or_else(|| QdropError::FileNotFound(source.to_path_buf()))?
        .to_string_lossy()
        .into_owned();

    let plaintext = std::fs::read(source)?;
    let sealed = seal_bytes(key, &basename, &plaintext)
        .map_err(|e| QdropError::Crypto(e.to_string()))?;

    let ciphertext_path = paths.staging_dir.join(format!("{basename}.enc"));
    std::fs::write(&ciphertext_path, &sealed).map_err(|e| {
        QdropError::WriteFailed(format!("writing {}: {e}", ciphertext_path.display()))
    })?;

    crate::keyfile::persist_key(&paths.key_file, key)?;

    tracing::info!(
        source = %source.display(),
        staged = %ciphertext_path.display(),
        plaintext_bytes = plaintext.len(),
        "file encrypted and staged"
    );

    Ok(StagedArtifact {
        source_name: basename,
        ciphertext_path,
        created_at: SystemTime::now(),
    })
}

/// Run one complete upload request for an authenticated session.
///
/// Generates a fresh key, encrypts and stages the source, then hands the
/// artifact to the transfer collaborator. The returned outcome is one of the
/// three terminal transfer states; transfer failures are reported, never
/// raised.
pub async fn run_upload(
    config: &QdropConfig,
    session: &Session,
    source: &Path,
) -> QdropResult<(StagedArtifact, TransferOutcome)> {
    if session.is_expired() {
        return Err(QdropError::Validation(format!(
            "session for {} has expired, log in again",
            session.username()
        )));
    }

    let paths = prepare_staging(config)?;
    let mut phase = UploadPhase::Idle;
    tracing::debug!(user = %session.username(), ?phase, "upload request started");

    let key = generate_upload_key();
    phase = UploadPhase::KeyGenerated;
    tracing::debug!(?phase, "fresh upload key generated");

    let artifact = encrypt_file(&paths, source, &key)?;
    phase = UploadPhase::Encrypted;
    tracing::debug!(?phase, artifact = %artifact.ciphertext_path.display(), "ciphertext written");

    phase = UploadPhase::Staged;
    tracing::debug!(?phase, "artifact staged, handing off");

    let outcome = qdrop_storage::hand_off(&config.transfer, &artifact).await;
    phase = outcome.phase();
    debug_assert!(phase.is_terminal());
    tracing::info!(user = %session.username(), ?phase, "upload request finished");

    Ok((artifact, outcome))
}
