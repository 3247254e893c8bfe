//! qdrop-users: durable credential store + sessions
//!
//! The store is an append-only file of JSON records, one per line. JSON
//! framing replaces naive delimiter-joined lines so field values may contain
//! any character. Records are never mutated or deleted.
//!
//! Concurrency contract: single-writer. The store file carries no lock;
//! exactly one process is expected to register users at a time.

pub mod session;
pub mod store;

pub use session::Session;
pub use store::{NewUser, UserRecord, UserStore};
