//! Hand-off of a staged artifact to the remote transfer collaborator
//!
//! Contract: this boundary never propagates an error. Every underlying
//! failure (operator construction, reachability, local read, remote write)
//! converts into `TransferOutcome::Failed`; a disabled transfer step is
//! reported as `Skipped`, distinctly from both success and failure.
//!
//! The whole attempt shares one deadline from `transfer.timeout_secs` — an
//! endpoint that accepts connections but never answers cannot stall the
//! caller past that bound.

use std::time::Duration;

use opendal::Operator;

use qdrop_core::config::TransferConfig;
use qdrop_core::{StagedArtifact, TransferOutcome};

/// Hand a staged artifact to object storage, keyed by its basename.
///
/// One attempt per call (the operator's own retry layer aside), bounded end
/// to end by `transfer.timeout_secs`.
pub async fn hand_off(cfg: &TransferConfig, artifact: &StagedArtifact) -> TransferOutcome {
    if !cfg.enabled {
        tracing::info!(
            artifact = %artifact.ciphertext_path.display(),
            "transfer disabled by config, leaving artifact staged"
        );
        return TransferOutcome::Skipped;
    }

    let deadline = Duration::from_secs(cfg.timeout_secs);
    match tokio::time::timeout(deadline, try_transfer(cfg, artifact)).await {
        Ok(Ok(())) => {
            tracing::info!(
                artifact = %artifact.ciphertext_path.display(),
                bucket = %cfg.bucket,
                "transfer succeeded"
            );
            TransferOutcome::Succeeded
        }
        Ok(Err(e)) => {
            tracing::warn!(
                artifact = %artifact.ciphertext_path.display(),
                error = %e,
                "transfer failed"
            );
            TransferOutcome::Failed {
                reason: e.to_string(),
            }
        }
        Err(_) => {
            tracing::warn!(
                artifact = %artifact.ciphertext_path.display(),
                timeout_secs = cfg.timeout_secs,
                "transfer timed out"
            );
            TransferOutcome::Failed {
                reason: format!("hand-off timed out after {}s", cfg.timeout_secs),
            }
        }
    }
}

async fn try_transfer(cfg: &TransferConfig, artifact: &StagedArtifact) -> anyhow::Result<()> {
    let op = crate::operator::build_operator(cfg)?;

    // Reported but non-fatal; the write below is the authoritative signal.
    if !bucket_reachable(&op).await {
        tracing::warn!(
            endpoint = %cfg.endpoint,
            bucket = %cfg.bucket,
            "destination bucket unreachable before transfer"
        );
    }

    let blob = tokio::fs::read(&artifact.ciphertext_path).await?;
    let remote_name = remote_key(artifact);

    op.write(&remote_name, blob)
        .await
        .map_err(|e| anyhow::anyhow!("remote write failed: {e}"))?;

    Ok(())
}

/// Cheap reachability probe against the destination bucket root. Runs under
/// the caller's hand-off deadline like everything else in the attempt.
async fn bucket_reachable(op: &Operator) -> bool {
    op.list("/").await.is_ok()
}

/// Objects are keyed by the staged blob's basename.
fn remote_key(artifact: &StagedArtifact) -> String {
    artifact
        .ciphertext_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| format!("{}.enc", artifact.source_name))
}
