//! Redis-backed session store for multi-server deployments.
//!
//! Each session is one hash, `session:<id>`, with one field per key. Every
//! write refreshes the hash's EXPIRE so idle sessions age out on their own.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use serde_json::Value;
use std::time::Duration;

use crate::domain::foundation::SessionId;
use crate::ports::{SessionStore, SessionStoreError};

/// Redis session storage.
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: MultiplexedConnection,
    lifetime: Duration,
}

impl RedisSessionStore {
    pub fn new(conn: MultiplexedConnection, lifetime: Duration) -> Self {
        Self { conn, lifetime }
    }

    fn hash_key(session_id: &SessionId) -> String {
        format!("session:{}", session_id)
    }
}

fn unavailable(e: redis::RedisError) -> SessionStoreError {
    SessionStoreError::Unavailable(e.to_string())
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get(
        &self,
        session_id: &SessionId,
        key: &str,
    ) -> Result<Option<Value>, SessionStoreError> {
        let mut conn = self.conn.clone();

        let raw: Option<String> = conn
            .hget(Self::hash_key(session_id), key)
            .await
            .map_err(unavailable)?;

        raw.map(|raw| {
            serde_json::from_str(&raw).map_err(|e| SessionStoreError::Serialization(e.to_string()))
        })
        .transpose()
    }

    async fn put(
        &self,
        session_id: &SessionId,
        key: &str,
        value: Value,
    ) -> Result<(), SessionStoreError> {
        let hash_key = Self::hash_key(session_id);
        let raw = serde_json::to_string(&value)
            .map_err(|e| SessionStoreError::Serialization(e.to_string()))?;
        let mut conn = self.conn.clone();

        conn.hset::<_, _, _, ()>(&hash_key, key, raw)
            .await
            .map_err(unavailable)?;

        conn.expire::<_, ()>(&hash_key, self.lifetime.as_secs() as i64)
            .await
            .map_err(unavailable)?;

        Ok(())
    }

    async fn remove(&self, session_id: &SessionId, key: &str) -> Result<(), SessionStoreError> {
        let mut conn = self.conn.clone();

        conn.hdel::<_, _, ()>(Self::hash_key(session_id), key)
            .await
            .map_err(unavailable)?;

        Ok(())
    }
}

impl std::fmt::Debug for RedisSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisSessionStore")
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}
