//! qdrop-core: shared types, config schema, and error types

pub mod config;
pub mod error;
pub mod types;

pub use config::QdropConfig;
pub use error::{QdropError, QdropResult};
pub use types::{StagedArtifact, TransferOutcome, UploadPhase};
