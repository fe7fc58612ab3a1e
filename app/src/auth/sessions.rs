//! Bearer-token sessions.

use chrono::{DateTime, Duration, Utc};
use eventease_core::UserId;
use eventease_core::environment::Clock;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Write;
use std::sync::{Arc, Mutex, PoisonError};

/// An open session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Session {
    /// Opaque bearer token
    pub token: String,
    /// Session owner
    pub user_id: UserId,
    /// Expiry
    pub expires_at: DateTime<Utc>,
}

/// Session store with a fixed TTL.
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Session>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Create a store whose sessions live for `ttl`
    #[must_use]
    pub fn new(ttl: std::time::Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl: Duration::from_std(ttl).unwrap_or(Duration::MAX),
            clock,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Session>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Opens a session for `user_id`.
    pub fn open(&self, user_id: UserId) -> Session {
        let token = generate_token();
        let expires_at = self
            .clock
            .now()
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let session = Session {
            token: token.clone(),
            user_id,
            expires_at,
        };
        self.lock().insert(token, session.clone());
        tracing::debug!(%user_id, "Session opened");
        session
    }

    /// Owner of a live session. Expired sessions are dropped.
    pub fn resolve(&self, token: &str) -> Option<UserId> {
        let now = self.clock.now();
        let mut sessions = self.lock();
        let session = sessions.get(token)?;
        if session.expires_at > now {
            return Some(session.user_id);
        }
        sessions.remove(token);
        None
    }

    /// Ends a session. Returns whether it existed.
    pub fn close(&self, token: &str) -> bool {
        self.lock().remove(token).is_some()
    }

    /// Ends every session of a user.
    pub fn close_all_for(&self, user_id: UserId) -> usize {
        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|_, session| session.user_id != user_id);
        before - sessions.len()
    }
}

/// 256 random bits, hex encoded.
fn generate_token() -> String {
    let bytes: [u8; 32] = rand::random();
    bytes.iter().fold(String::with_capacity(64), |mut token, byte| {
        let _ = write!(token, "{byte:02x}");
        token
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventease_testing::{ManualClock, test_clock};

    fn store(clock: ManualClock) -> SessionStore {
        SessionStore::new(std::time::Duration::from_secs(3_600), Arc::new(clock))
    }

    #[test]
    fn test_open_resolve_close() {
        let store = store(ManualClock::starting_at(test_clock().now()));
        let user = UserId::new();
        let session = store.open(user);

        assert_eq!(session.token.len(), 64);
        assert!(session.token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(store.resolve(&session.token), Some(user));
        assert!(store.close(&session.token));
        assert!(!store.close(&session.token));
        assert_eq!(store.resolve(&session.token), None);
    }

    #[test]
    fn test_session_expires() {
        let clock = ManualClock::starting_at(test_clock().now());
        let store = store(clock.clone());
        let session = store.open(UserId::new());

        clock.advance(Duration::hours(1));
        assert_eq!(store.resolve(&session.token), None);
    }

    #[test]
    fn test_close_all_for_user() {
        let store = store(ManualClock::starting_at(test_clock().now()));
        let user = UserId::new();
        let other = store.open(UserId::new());
        store.open(user);
        store.open(user);

        assert_eq!(store.close_all_for(user), 2);
        assert!(store.resolve(&other.token).is_some());
    }

    #[test]
    fn test_tokens_are_unique() {
        let store = store(ManualClock::starting_at(test_clock().now()));
        let user = UserId::new();
        assert_ne!(store.open(user).token, store.open(user).token);
    }
}
