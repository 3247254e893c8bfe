//! Explicit sessions, passed by the caller into identity-bearing operations

use std::time::{Duration, Instant};

/// An authenticated session for one user.
///
/// Created only after a successful `authenticate` call and handed to each
/// operation that needs an identity; dropping it is logout. There is no
/// process-global current user.
#[derive(Debug, Clone)]
pub struct Session {
    username: String,
    opened_at: Instant,
    ttl: Duration,
}

impl Session {
    pub fn open(username: impl Into<String>, ttl: Duration) -> Self {
        let username = username.into();
        tracing::debug!(%username, ?ttl, "session opened");
        Self {
            username,
            opened_at: Instant::now(),
            ttl,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn is_expired(&self) -> bool {
        self.opened_at.elapsed() >= self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_session_is_valid() {
        let session = Session::open("alice", Duration::from_secs(900));
        assert_eq!(session.username(), "alice");
        assert!(!session.is_expired());
    }

    #[test]
    fn test_zero_ttl_expires_immediately() {
        let session = Session::open("alice", Duration::ZERO);
        assert!(session.is_expired());
    }
}
