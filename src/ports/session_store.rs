//! Session store port.
//!
//! A per-visitor key/value store. Values are JSON documents; the typed
//! layer on top (`VisitorSession`) decides what shapes go in and out.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::domain::foundation::{ErrorCode, SessionId};

/// Errors that can occur during session store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Session store unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to serialize session value: {0}")]
    Serialization(String),
}

impl SessionStoreError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::SessionStoreError
    }
}

/// Port for visitor-scoped session storage.
///
/// Implementations must give read-your-writes consistency per session and
/// refresh the session's lifetime on every write.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Value stored under `key`, or `None` if absent or the session expired.
    async fn get(&self, session_id: &SessionId, key: &str)
        -> Result<Option<Value>, SessionStoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn put(
        &self,
        session_id: &SessionId,
        key: &str,
        value: Value,
    ) -> Result<(), SessionStoreError>;

    /// Deletes `key`. Removing a missing key is not an error.
    async fn remove(&self, session_id: &SessionId, key: &str) -> Result<(), SessionStoreError>;
}

/// A type that may be kept in a session.
///
/// The tag is stored next to the value and checked on the way out, so a
/// value written as one type is never handed back as another.
pub trait SessionValue: Serialize + DeserializeOwned + Send + Sync {
    const TYPE_TAG: &'static str;
}

impl SessionValue for String {
    const TYPE_TAG: &'static str = "string";
}

/// Outcome of a typed session read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched<T> {
    Found(T),
    /// Nothing stored under the key (never set, removed, or expired).
    NotFound,
    /// Something is stored but it is not a `T`.
    WrongShape,
}

impl<T> Fetched<T> {
    /// Collapses `NotFound` and `WrongShape` into `None`.
    pub fn found(self) -> Option<T> {
        match self {
            Fetched::Found(value) => Some(value),
            Fetched::NotFound | Fetched::WrongShape => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Fetched::Found(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn SessionStore) {}
    }

    #[test]
    fn found_collapses_failures() {
        assert_eq!(Fetched::Found(3).found(), Some(3));
        assert_eq!(Fetched::<i32>::NotFound.found(), None);
        assert_eq!(Fetched::<i32>::WrongShape.found(), None);
        assert!(!Fetched::<i32>::WrongShape.is_found());
    }
}
