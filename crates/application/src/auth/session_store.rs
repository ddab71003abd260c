//! Persisted authentication session.
//!
//! The session lives in one key/value slot and is mirrored in memory so
//! every request can read the bearer token without touching storage.

use std::sync::Arc;

use easytest_domain::AuthSession;
use tokio::sync::RwLock;

use crate::ports::{KeyValueStore, StorageError};

/// Slot holding the serialized session.
pub const SESSION_KEY: &str = "easytest-auth";

/// Thread-safe session holder backed by a key/value store.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
    current: Arc<RwLock<Option<AuthSession>>>,
}

impl SessionStore {
    /// Creates an empty session holder. Call [`Self::load`] to read the slot.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            current: Arc::new(RwLock::new(None)),
        }
    }

    /// Reads the persisted session into memory.
    ///
    /// An unreadable or corrupt slot is logged and treated as signed out.
    pub async fn load(&self) -> Option<AuthSession> {
        let session = match self.store.get(SESSION_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<AuthSession>(&raw) {
                Ok(session) => Some(session),
                Err(error) => {
                    tracing::warn!(%error, "ignoring corrupt auth session");
                    None
                }
            },
            Ok(None) => None,
            Err(error) => {
                tracing::warn!(%error, "failed to read auth session");
                None
            }
        };
        self.current.write().await.clone_from(&session);
        session
    }

    /// Stores a session in memory and in the slot.
    ///
    /// # Errors
    /// Returns `StorageError` if the slot cannot be written. The in-memory
    /// session is updated regardless.
    pub async fn save(&self, session: AuthSession) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&session).map_err(|e| StorageError::Corrupt {
            key: SESSION_KEY.to_string(),
            message: e.to_string(),
        })?;
        *self.current.write().await = Some(session);
        self.store.set(SESSION_KEY, &raw).await
    }

    /// Replaces the access token of the current session.
    ///
    /// # Errors
    /// Returns `StorageError` if the slot cannot be written.
    pub async fn set_access_token(&self, token: &str) -> Result<(), StorageError> {
        let updated = {
            let mut current = self.current.write().await;
            let Some(session) = current.as_mut() else {
                return Ok(());
            };
            token.clone_into(&mut session.access_token);
            session.clone()
        };
        self.save(updated).await
    }

    /// Drops the session from memory and storage.
    pub async fn clear(&self) {
        *self.current.write().await = None;
        if let Err(error) = self.store.remove(SESSION_KEY).await {
            tracing::warn!(%error, "failed to remove auth session");
        }
    }

    /// Returns a copy of the current session.
    pub async fn current(&self) -> Option<AuthSession> {
        self.current.read().await.clone()
    }

    /// Returns the current bearer token.
    pub async fn access_token(&self) -> Option<String> {
        self.current
            .read()
            .await
            .as_ref()
            .map(|session| session.access_token.clone())
    }

    /// Returns the current refresh token.
    pub async fn refresh_token(&self) -> Option<String> {
        self.current
            .read()
            .await
            .as_ref()
            .and_then(|session| session.refresh_token.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::MemoryStore;
    use pretty_assertions::assert_eq;

    fn session(token: &str) -> AuthSession {
        AuthSession {
            access_token: token.to_string(),
            refresh_token: Some("refresh-1".to_string()),
            user: None,
        }
    }

    #[tokio::test]
    async fn test_save_then_load_from_fresh_holder() {
        let store = Arc::new(MemoryStore::default());
        SessionStore::new(store.clone())
            .save(session("access-1"))
            .await
            .unwrap();

        let reloaded = SessionStore::new(store);
        assert_eq!(reloaded.access_token().await, None);
        assert_eq!(reloaded.load().await, Some(session("access-1")));
        assert_eq!(reloaded.refresh_token().await.as_deref(), Some("refresh-1"));
    }

    #[tokio::test]
    async fn test_corrupt_slot_is_signed_out() {
        let store = Arc::new(MemoryStore::with_slot(SESSION_KEY, "not json"));
        let sessions = SessionStore::new(store);
        assert_eq!(sessions.load().await, None);
    }

    #[tokio::test]
    async fn test_set_access_token_persists() {
        let store = Arc::new(MemoryStore::default());
        let sessions = SessionStore::new(store.clone());
        sessions.save(session("old")).await.unwrap();
        sessions.set_access_token("new").await.unwrap();

        let raw = store.slot(SESSION_KEY).unwrap();
        assert!(raw.contains("\"new\""));
        assert_eq!(sessions.access_token().await.as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_clear_removes_slot() {
        let store = Arc::new(MemoryStore::default());
        let sessions = SessionStore::new(store.clone());
        sessions.save(session("access-1")).await.unwrap();
        sessions.clear().await;

        assert_eq!(store.slot(SESSION_KEY), None);
        assert_eq!(sessions.current().await, None);
    }
}
