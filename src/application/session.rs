//! Typed access to one visitor's session.
//!
//! [`VisitorSession`] binds a [`SessionStore`] to the session id of the
//! current request. Values go in wrapped in a tagged envelope and come back
//! out as a [`Fetched`], so a missing value and a value of the wrong shape
//! are both reported instead of failing the request.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::SessionId;
use crate::ports::{Fetched, SessionStore, SessionStoreError, SessionValue};

/// Well-known session keys.
pub mod keys {
    /// The staged reservation.
    pub const RESERVATION: &str = "reservation";
    pub const FLASH: &str = "flash";
    pub const WARNING: &str = "warning";
    pub const ERROR: &str = "error";
}

#[derive(Serialize, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    type_tag: String,
    value: Value,
}

/// One-shot notices shown on the next rendered page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notices {
    pub flash: Option<String>,
    pub warning: Option<String>,
    pub error: Option<String>,
}

/// Session store scoped to a single visitor.
#[derive(Clone)]
pub struct VisitorSession {
    id: SessionId,
    store: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for VisitorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisitorSession").field("id", &self.id).finish()
    }
}

impl VisitorSession {
    pub fn new(id: SessionId, store: Arc<dyn SessionStore>) -> Self {
        Self { id, store }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Stores `value` under `key`, replacing whatever was there.
    pub async fn put<T: SessionValue>(&self, key: &str, value: &T) -> Result<(), SessionStoreError> {
        let value = serde_json::to_value(value)
            .map_err(|e| SessionStoreError::Serialization(e.to_string()))?;
        let envelope = serde_json::to_value(Envelope {
            type_tag: T::TYPE_TAG.to_string(),
            value,
        })
        .map_err(|e| SessionStoreError::Serialization(e.to_string()))?;

        self.store.put(&self.id, key, envelope).await
    }

    /// Reads `key` back as a `T`.
    ///
    /// # Errors
    ///
    /// Only store failures are errors; absent or mismatched values are
    /// reported through [`Fetched`].
    pub async fn get<T: SessionValue>(&self, key: &str) -> Result<Fetched<T>, SessionStoreError> {
        match self.store.get(&self.id, key).await? {
            Some(raw) => Ok(decode(raw)),
            None => Ok(Fetched::NotFound),
        }
    }

    pub async fn remove(&self, key: &str) -> Result<(), SessionStoreError> {
        self.store.remove(&self.id, key).await
    }

    /// Records a notice for the next page view.
    pub async fn put_message(
        &self,
        key: &str,
        message: impl Into<String>,
    ) -> Result<(), SessionStoreError> {
        self.put(key, &message.into()).await
    }

    /// Reads and clears a notice.
    pub async fn pop_message(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        match self.get::<String>(key).await? {
            Fetched::Found(message) => {
                self.remove(key).await?;
                Ok(Some(message))
            }
            Fetched::NotFound => Ok(None),
            Fetched::WrongShape => {
                self.remove(key).await?;
                Ok(None)
            }
        }
    }

    /// Pops every notice. Store failures are logged and read as "no notice".
    pub async fn take_notices(&self) -> Notices {
        let mut notices = Notices::default();
        for (key, slot) in [
            (keys::FLASH, &mut notices.flash),
            (keys::WARNING, &mut notices.warning),
            (keys::ERROR, &mut notices.error),
        ] {
            match self.pop_message(key).await {
                Ok(message) => *slot = message,
                Err(e) => {
                    tracing::warn!(session_id = %self.id, key, error = %e, "Failed to read session notice");
                }
            }
        }
        notices
    }
}

fn decode<T: SessionValue>(raw: Value) -> Fetched<T> {
    let envelope: Envelope = match serde_json::from_value(raw) {
        Ok(envelope) => envelope,
        Err(_) => return Fetched::WrongShape,
    };
    if envelope.type_tag != T::TYPE_TAG {
        return Fetched::WrongShape;
    }
    match serde_json::from_value(envelope.value) {
        Ok(value) => Fetched::Found(value),
        Err(_) => Fetched::WrongShape,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::reservation::{Reservation, StayPeriod};
    use serde_json::json;

    fn session() -> (VisitorSession, Arc<InMemorySessionStore>) {
        let store = Arc::new(InMemorySessionStore::new());
        (VisitorSession::new(SessionId::new(), store.clone()), store)
    }

    fn reservation() -> Reservation {
        let mut r = Reservation::for_stay(StayPeriod::parse("2021-01-01", "2021-01-02").unwrap());
        r.first_name = "Stephen".to_string();
        r.last_name = "Montague".to_string();
        r.email = "hello@gmail.com".to_string();
        r
    }

    #[tokio::test]
    async fn put_then_get_returns_equal_value() {
        let (session, _) = session();
        let staged = reservation();
        session.put(keys::RESERVATION, &staged).await.unwrap();

        let fetched = session.get::<Reservation>(keys::RESERVATION).await.unwrap();
        assert_eq!(fetched, Fetched::Found(staged));
    }

    #[tokio::test]
    async fn get_without_put_is_not_found() {
        let (session, _) = session();
        let fetched = session.get::<Reservation>(keys::RESERVATION).await.unwrap();
        assert_eq!(fetched, Fetched::NotFound);
    }

    #[tokio::test]
    async fn get_after_remove_is_not_found() {
        let (session, _) = session();
        session.put(keys::RESERVATION, &reservation()).await.unwrap();
        session.remove(keys::RESERVATION).await.unwrap();

        let fetched = session.get::<Reservation>(keys::RESERVATION).await.unwrap();
        assert_eq!(fetched, Fetched::NotFound);
    }

    #[tokio::test]
    async fn value_of_other_type_is_wrong_shape() {
        let (session, _) = session();
        session.put_message(keys::RESERVATION, "not a reservation").await.unwrap();

        let fetched = session.get::<Reservation>(keys::RESERVATION).await.unwrap();
        assert_eq!(fetched, Fetched::WrongShape);
    }

    #[tokio::test]
    async fn untagged_or_tampered_value_is_wrong_shape() {
        let (session, store) = session();
        store
            .put(&session.id(), keys::RESERVATION, json!({"first_name": "x"}))
            .await
            .unwrap();
        assert_eq!(
            session.get::<Reservation>(keys::RESERVATION).await.unwrap(),
            Fetched::WrongShape
        );

        store
            .put(
                &session.id(),
                keys::RESERVATION,
                json!({"type": "reservation.v1", "value": {"first_name": 12}}),
            )
            .await
            .unwrap();
        assert_eq!(
            session.get::<Reservation>(keys::RESERVATION).await.unwrap(),
            Fetched::WrongShape
        );
    }

    #[tokio::test]
    async fn sessions_do_not_see_each_other() {
        let store = Arc::new(InMemorySessionStore::new());
        let alice = VisitorSession::new(SessionId::new(), store.clone());
        let bob = VisitorSession::new(SessionId::new(), store);

        alice.put(keys::RESERVATION, &reservation()).await.unwrap();
        assert_eq!(
            bob.get::<Reservation>(keys::RESERVATION).await.unwrap(),
            Fetched::NotFound
        );
    }

    #[tokio::test]
    async fn notices_are_read_once() {
        let (session, _) = session();
        session.put_message(keys::ERROR, "Can't get reservation from session").await.unwrap();
        session.put_message(keys::FLASH, "Saved").await.unwrap();

        let notices = session.take_notices().await;
        assert_eq!(notices.error.as_deref(), Some("Can't get reservation from session"));
        assert_eq!(notices.flash.as_deref(), Some("Saved"));
        assert_eq!(notices.warning, None);

        assert_eq!(session.take_notices().await, Notices::default());
    }
}
