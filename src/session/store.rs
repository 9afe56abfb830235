//! In-memory session store
//!
//! Maps session ids to their `SessionState`. Entries are created on the first
//! submit of a session and evicted once they sit idle past the configured
//! timeout. Eviction happens lazily whenever the store is touched.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::dashboard::SessionState;

/// Unique identifier for a browser session
pub type SessionId = String;

/// Configuration for the session store
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Maximum number of live sessions
    pub max_sessions: usize,
    /// Sessions untouched for this long are discarded
    pub idle_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_sessions: 10_000,
            idle_timeout: Duration::from_secs(60 * 60),
        }
    }
}

struct SessionEntry {
    state: SessionState,
    last_seen: Instant,
}

/// Per-session state, shared by all request handlers
pub struct SessionStore {
    /// Live sessions: SessionId → SessionEntry
    sessions: Arc<RwLock<HashMap<SessionId, SessionEntry>>>,
    config: SessionConfig,
}

impl SessionStore {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Look up a session, refreshing its idle timer
    ///
    /// Returns `None` for unknown and expired sessions.
    pub async fn get(&self, id: &str) -> Option<SessionState> {
        let mut sessions = self.sessions.write().await;
        self.evict_idle(&mut sessions);

        let entry = sessions.get_mut(id)?;
        entry.last_seen = Instant::now();
        Some(entry.state.clone())
    }

    /// Store the state for a session
    ///
    /// A known `id` is overwritten in place. An absent or unknown id gets a
    /// freshly generated one; ids are never taken from the client.
    pub async fn save(
        &self,
        id: Option<&str>,
        state: SessionState,
    ) -> Result<SessionId, SessionError> {
        let mut sessions = self.sessions.write().await;
        self.evict_idle(&mut sessions);

        if let Some(id) = id {
            if let Some(entry) = sessions.get_mut(id) {
                entry.state = state;
                entry.last_seen = Instant::now();
                tracing::debug!(session_id = %id, "Session updated");
                return Ok(id.to_string());
            }
        }

        if sessions.len() >= self.config.max_sessions {
            tracing::warn!(
                max_sessions = self.config.max_sessions,
                "Session limit reached"
            );
            return Err(SessionError::TooManySessions);
        }

        let id = Uuid::new_v4().to_string();
        sessions.insert(
            id.clone(),
            SessionEntry {
                state,
                last_seen: Instant::now(),
            },
        );

        tracing::info!(session_id = %id, "Session created");
        Ok(id)
    }

    /// Number of live sessions
    ///
    /// Idle sessions are evicted first, so an expired session never counts
    /// against the limit.
    pub async fn len(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        self.evict_idle(&mut sessions);
        sessions.len()
    }

    fn evict_idle(&self, sessions: &mut HashMap<SessionId, SessionEntry>) {
        let before = sessions.len();
        let timeout = self.config.idle_timeout;
        sessions.retain(|_, entry| entry.last_seen.elapsed() <= timeout);

        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::debug!(evicted, remaining = sessions.len(), "Evicted idle sessions");
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

/// Session store errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("Maximum number of sessions reached")]
    TooManySessions,

    #[error("Session not found: {0}")]
    NotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submitted(text: &str) -> SessionState {
        SessionState::submit(None, text)
    }

    #[tokio::test]
    async fn test_save_creates_session() {
        let store = SessionStore::default();
        assert_eq!(store.len().await, 0);

        let id = store.save(None, submitted("X")).await.unwrap();
        assert_eq!(store.len().await, 1);

        let state = store.get(&id).await.unwrap();
        assert_eq!(state.last_prompt.as_deref(), Some("X"));
    }

    #[tokio::test]
    async fn test_save_overwrites_known_session() {
        let store = SessionStore::default();
        let id = store.save(None, submitted("first")).await.unwrap();
        let same = store.save(Some(&id), submitted("second")).await.unwrap();

        assert_eq!(id, same);
        assert_eq!(store.len().await, 1);
        assert_eq!(
            store.get(&id).await.unwrap().last_prompt.as_deref(),
            Some("second")
        );
    }

    #[tokio::test]
    async fn test_unknown_id_gets_fresh_session() {
        let store = SessionStore::default();
        let id = store.save(Some("made-up"), submitted("X")).await.unwrap();

        assert_ne!(id, "made-up");
        assert!(store.get("made-up").await.is_none());
        assert!(store.get(&id).await.is_some());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::default();
        let a = store.save(None, submitted("alpha")).await.unwrap();
        let b = store.save(None, submitted("beta")).await.unwrap();

        assert_ne!(a, b);
        assert_eq!(store.get(&a).await.unwrap().last_prompt.as_deref(), Some("alpha"));
        assert_eq!(store.get(&b).await.unwrap().last_prompt.as_deref(), Some("beta"));
    }

    #[tokio::test]
    async fn test_session_limit() {
        let store = SessionStore::new(SessionConfig {
            max_sessions: 1,
            ..Default::default()
        });
        let id = store.save(None, submitted("one")).await.unwrap();

        assert_eq!(
            store.save(None, submitted("two")).await,
            Err(SessionError::TooManySessions)
        );
        // Updating an existing session is still allowed at the limit
        assert!(store.save(Some(&id), submitted("three")).await.is_ok());
    }

    #[tokio::test]
    async fn test_idle_sessions_expire() {
        let store = SessionStore::new(SessionConfig {
            idle_timeout: Duration::from_millis(5),
            ..Default::default()
        });
        let id = store.save(None, submitted("X")).await.unwrap();

        tokio::time::sleep(Duration::from_millis(30)).await;

        assert!(store.get(&id).await.is_none());
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_len_skips_idle_sessions() {
        let store = SessionStore::new(SessionConfig {
            max_sessions: 1,
            idle_timeout: Duration::from_millis(5),
        });
        store.save(None, submitted("X")).await.unwrap();
        assert_eq!(store.len().await, 1);

        tokio::time::sleep(Duration::from_millis(30)).await;

        // Nothing touched the session, yet it no longer counts
        assert_eq!(store.len().await, 0);
        assert!(store.save(None, submitted("Y")).await.is_ok());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            SessionError::TooManySessions.to_string(),
            "Maximum number of sessions reached"
        );
        assert_eq!(
            SessionError::NotFound("abc".to_string()).to_string(),
            "Session not found: abc"
        );
    }
}
