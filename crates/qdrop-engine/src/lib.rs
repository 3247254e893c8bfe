//! qdrop-engine: the encrypt-and-stage pipeline
//!
//! One upload request runs this machine to completion before the next
//! begins:
//!
//! ```text
//! Idle → KeyGenerated → Encrypted → Staged → {TransferSucceeded |
//!                                             TransferFailed |
//!                                             TransferSkipped}
//! ```
//!
//! Encryption and staging are synchronous, whole-file-in-memory operations
//! (the target is small text files); only the transfer hand-off is async.

pub mod keyfile;
pub mod pipeline;

pub use keyfile::{load_key, persist_key};
pub use pipeline::{encrypt_file, prepare_staging, run_upload, StagingPaths};
