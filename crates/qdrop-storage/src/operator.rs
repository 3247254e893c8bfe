//! OpenDAL Operator factory for the remote transfer collaborator

use anyhow::{Context, Result};
use opendal::Operator;

use qdrop_core::config::TransferConfig;

/// Build an OpenDAL Operator for the configured S3-compatible endpoint.
///
/// Credentials come from the environment (AWS_ACCESS_KEY_ID /
/// AWS_SECRET_ACCESS_KEY); they are deliberately not part of the config
/// file. Path-style addressing (the opendal 0.55 default) is kept, as
/// required by MinIO and similar self-hosted endpoints.
///
/// If `enforce_tls` is set and the endpoint uses HTTP, this returns an
/// error. Otherwise a warning is logged for non-HTTPS endpoints.
pub fn build_operator(cfg: &TransferConfig) -> Result<Operator> {
    if cfg.endpoint.starts_with("http://") {
        if cfg.enforce_tls {
            anyhow::bail!(
                "transfer endpoint uses plaintext HTTP ({}), but enforce_tls is enabled. \
                 Use an HTTPS endpoint or set transfer.enforce_tls = false for local development.",
                cfg.endpoint
            );
        }
        tracing::warn!(
            endpoint = %cfg.endpoint,
            "transfer endpoint uses plaintext HTTP — staged artifacts are transmitted unencrypted \
             at the transport layer. Set transfer.enforce_tls = true and use HTTPS in production."
        );
    }

    let access_key_id = std::env::var("AWS_ACCESS_KEY_ID").unwrap_or_default();
    let secret_access_key = std::env::var("AWS_SECRET_ACCESS_KEY").unwrap_or_default();

    let builder = opendal::services::S3::default()
        .endpoint(&cfg.endpoint)
        .region(&cfg.region)
        .bucket(&cfg.bucket)
        .access_key_id(&access_key_id)
        .secret_access_key(&secret_access_key);

    let op = Operator::new(builder)
        .context("creating OpenDAL S3 operator")?
        .layer(opendal::layers::LoggingLayer::default())
        .layer(
            opendal::layers::RetryLayer::new()
                .with_max_times(3)
                .with_jitter(),
        )
        .finish();

    Ok(op)
}
