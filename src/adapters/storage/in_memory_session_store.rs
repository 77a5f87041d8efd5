//! In-Memory Session Store Adapter
//!
//! Keeps every visitor's values in process memory. Used when no Redis URL
//! is configured, and by tests.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::domain::foundation::SessionId;
use crate::ports::{SessionStore, SessionStoreError};

const DEFAULT_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug)]
struct Entry {
    values: HashMap<String, Value>,
    expires_at: Instant,
}

/// In-memory session storage with a sliding lifetime per session.
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Entry>>>,
    lifetime: Duration,
}

impl InMemorySessionStore {
    /// Store with the default 24 hour lifetime.
    pub fn new() -> Self {
        Self::with_lifetime(DEFAULT_LIFETIME)
    }

    pub fn with_lifetime(lifetime: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            lifetime,
        }
    }

    /// Number of sessions held, expired ones included until purged.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drops every expired session.
    pub async fn purge_expired(&self) {
        let now = Instant::now();
        self.sessions
            .write()
            .await
            .retain(|_, entry| entry.expires_at > now);
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(
        &self,
        session_id: &SessionId,
        key: &str,
    ) -> Result<Option<Value>, SessionStoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(session_id)
            .filter(|entry| entry.expires_at > Instant::now())
            .and_then(|entry| entry.values.get(key).cloned()))
    }

    async fn put(
        &self,
        session_id: &SessionId,
        key: &str,
        value: Value,
    ) -> Result<(), SessionStoreError> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let entry = sessions.entry(*session_id).or_insert_with(|| Entry {
            values: HashMap::new(),
            expires_at: now,
        });
        if entry.expires_at <= now {
            entry.values.clear();
        }
        entry.values.insert(key.to_string(), value);
        entry.expires_at = now + self.lifetime;
        Ok(())
    }

    async fn remove(&self, session_id: &SessionId, key: &str) -> Result<(), SessionStoreError> {
        if let Some(entry) = self.sessions.write().await.get_mut(session_id) {
            entry.values.remove(key);
        }
        Ok(())
    }
}
