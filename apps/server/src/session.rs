//! # Session Store
//!
//! Server-side sessions held in memory, keyed by a random cookie token.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Session Lifecycle                                │
//! │                                                                         │
//! │  POST /login (valid) ──► create() ──► uuid-v4 token ──► Set-Cookie     │
//! │                                                                         │
//! │  Each request ──► get(token, ttl) ──┬── fresh? Session clone           │
//! │                                     └── expired/missing? None          │
//! │                                         (expired entries are removed)  │
//! │                                                                         │
//! │  GET / first render ──► take_low_stock_alert() ──► true ONCE           │
//! │                                                                         │
//! │  GET /logout ──► remove() ──► session + alert flag gone together       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sessions do not survive a restart; for a single-shop counter app that is
//! an accepted trade (everyone just logs in again).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::debug;
use uuid::Uuid;

/// One logged-in user.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: i64,
    pub username: String,

    /// Set once the dashboard has shown this session its low-stock alerts.
    pub low_stock_notified: bool,

    /// Creation instant, used for TTL expiry.
    pub created_at: Instant,
}

/// Shared in-memory session map.
///
/// Cloning is cheap (Arc); every handler sees the same map.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<String, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        SessionStore::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Session>> {
        // A poisoned lock only means another thread panicked mid-insert;
        // the map itself is still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Creates a session and returns its cookie token.
    ///
    /// Each login also sweeps entries older than `ttl`, so abandoned
    /// sessions (cookie never presented again) cannot grow the map
    /// without bound between restarts.
    pub fn create(&self, user_id: i64, username: &str, ttl: Duration) -> String {
        let token = Uuid::new_v4().to_string();

        let mut sessions = self.lock();
        sessions.retain(|_, session| session.created_at.elapsed() <= ttl);
        sessions.insert(
            token.clone(),
            Session {
                user_id,
                username: username.to_string(),
                low_stock_notified: false,
                created_at: Instant::now(),
            },
        );

        debug!(user_id = %user_id, live_sessions = sessions.len(), "Session created");
        token
    }

    /// Looks up a session, removing it if it has outlived `ttl`.
    pub fn get(&self, token: &str, ttl: Duration) -> Option<Session> {
        let mut sessions = self.lock();

        match sessions.get(token) {
            Some(session) if session.created_at.elapsed() <= ttl => Some(session.clone()),
            Some(_) => {
                debug!("Session expired");
                sessions.remove(token);
                None
            }
            None => None,
        }
    }

    /// Removes a session (logout). Idempotent.
    pub fn remove(&self, token: &str) {
        self.lock().remove(token);
    }

    /// Returns true exactly once per session: the first call flips the
    /// `low_stock_notified` flag, later calls see it set.
    ///
    /// Unknown tokens return false (no session, no alerts).
    pub fn take_low_stock_alert(&self, token: &str) -> bool {
        let mut sessions = self.lock();

        match sessions.get_mut(token) {
            Some(session) if !session.low_stock_notified => {
                session.low_stock_notified = true;
                true
            }
            _ => false,
        }
    }

    /// Number of live sessions (diagnostics only; includes expired entries
    /// that have not been touched since expiry).
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(3600);

    #[test]
    fn test_create_and_get() {
        let store = SessionStore::new();
        let token = store.create(7, "marta", TTL);

        let session = store.get(&token, TTL).unwrap();
        assert_eq!(session.user_id, 7);
        assert_eq!(session.username, "marta");
        assert!(!session.low_stock_notified);
    }

    #[test]
    fn test_unknown_token() {
        let store = SessionStore::new();
        assert!(store.get("nope", TTL).is_none());
    }

    #[test]
    fn test_expired_session_is_removed() {
        let store = SessionStore::new();
        let token = store.create(7, "marta", TTL);

        // Zero TTL: the session is already expired
        assert!(store.get(&token, Duration::ZERO).is_none());
        // And it was removed, not just hidden
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_sweeps_abandoned_sessions() {
        let store = SessionStore::new();

        // Sessions whose cookies are never presented again
        store.create(1, "marta", TTL);
        store.create(2, "pedro", TTL);
        assert_eq!(store.len(), 2);
        std::thread::sleep(Duration::from_millis(2));

        // A later login under a zero TTL treats them all as expired;
        // only the fresh session survives the sweep
        let token = store.create(3, "ana", Duration::ZERO);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&token, TTL).unwrap().username, "ana");
    }

    #[test]
    fn test_low_stock_alert_fires_once() {
        let store = SessionStore::new();
        let token = store.create(7, "marta", TTL);

        assert!(store.take_low_stock_alert(&token));
        assert!(!store.take_low_stock_alert(&token));
        assert!(!store.take_low_stock_alert(&token));

        // A new session gets a fresh flag
        let token2 = store.create(7, "marta", TTL);
        assert!(store.take_low_stock_alert(&token2));
    }

    #[test]
    fn test_remove_clears_alert_flag_with_session() {
        let store = SessionStore::new();
        let token = store.create(7, "marta", TTL);
        assert!(store.take_low_stock_alert(&token));

        store.remove(&token);
        assert!(store.get(&token, TTL).is_none());
        assert!(!store.take_low_stock_alert(&token));
    }
}
