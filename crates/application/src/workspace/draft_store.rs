//! Draft persistence
//!
//! Keeps the in-progress draft, the environment selection and the loaded
//! test case in a [`KeyValueStore`] so they survive a restart. Restoration is
//! best effort: unreadable or corrupt slots are logged and skipped.

use std::sync::Arc;

use easytest_domain::{DraftBaseline, DraftRequest, StoredDraft};
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::ports::{KeyValueStore, StorageError};

/// Slot holding the request draft. Not per test case.
pub const DRAFT_KEY: &str = "api-test-workspace-draft";

/// Prefix of the environment selection slot.
pub const ENV_SELECTION_KEY: &str = "api-test-selected-env";

/// Slot holding the loaded test case and its baseline.
pub const LOADED_CASE_KEY: &str = "api-test-loaded-case";

/// A stored test case currently hydrated into the draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedCase {
    /// Backend identifier of the case.
    pub case_id: u64,
    /// Field values when the case was loaded or last saved.
    pub baseline: DraftBaseline,
}

/// Returns the selection slot key for an optional project.
#[must_use]
pub fn selection_key(project_id: Option<u64>) -> String {
    project_id.map_or_else(
        || ENV_SELECTION_KEY.to_string(),
        |id| format!("{ENV_SELECTION_KEY}-{id}"),
    )
}

/// Reads and writes the workspace slots.
#[derive(Clone)]
pub struct DraftStore {
    store: Arc<dyn KeyValueStore>,
}

impl DraftStore {
    /// Creates a draft store over a key/value store.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Writes the draft when it differs from a fresh one.
    ///
    /// A draft edited back to blank removes the slot instead, and
    /// `Ok(false)` is returned. Nothing is written for a blank draft.
    ///
    /// # Errors
    /// Returns a `StorageError` if the slot cannot be written.
    pub async fn save_draft(&self, draft: &DraftRequest) -> Result<bool, StorageError> {
        if !draft.has_content() {
            self.store.remove(DRAFT_KEY).await?;
            return Ok(false);
        }
        let json = encode(DRAFT_KEY, &draft.to_stored())?;
        self.store.set(DRAFT_KEY, &json).await?;
        debug!(url = %draft.url, "draft saved");
        Ok(true)
    }

    /// Restores the draft, with one blank row appended to each list.
    pub async fn restore_draft(&self) -> Option<DraftRequest> {
        self.read::<StoredDraft>(DRAFT_KEY)
            .await
            .map(DraftRequest::from_stored)
    }

    /// Removes the draft slot.
    ///
    /// # Errors
    /// Returns a `StorageError` if the slot cannot be removed.
    pub async fn clear_draft(&self) -> Result<(), StorageError> {
        self.store.remove(DRAFT_KEY).await
    }

    /// Persists the environment selection. `None` removes the slot.
    ///
    /// # Errors
    /// Returns a `StorageError` if the slot cannot be written.
    pub async fn save_selection(
        &self,
        project_id: Option<u64>,
        environment_id: Option<u64>,
    ) -> Result<(), StorageError> {
        let key = selection_key(project_id);
        match environment_id {
            Some(id) => self.store.set(&key, &id.to_string()).await,
            None => self.store.remove(&key).await,
        }
    }

    /// Restores the environment selection.
    pub async fn load_selection(&self, project_id: Option<u64>) -> Option<u64> {
        self.read::<u64>(&selection_key(project_id)).await
    }

    /// Persists the loaded case. `None` removes the slot.
    ///
    /// # Errors
    /// Returns a `StorageError` if the slot cannot be written.
    pub async fn save_loaded_case(&self, loaded: Option<&LoadedCase>) -> Result<(), StorageError> {
        match loaded {
            Some(loaded) => {
                let json = encode(LOADED_CASE_KEY, loaded)?;
                self.store.set(LOADED_CASE_KEY, &json).await
            }
            None => self.store.remove(LOADED_CASE_KEY).await,
        }
    }

    /// Restores the loaded case.
    pub async fn load_loaded_case(&self) -> Option<LoadedCase> {
        self.read(LOADED_CASE_KEY).await
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key).await {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "skipping unreadable slot");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                let e = StorageError::Corrupt {
                    key: key.to_string(),
                    message: e.to_string(),
                };
                warn!(error = %e, "skipping corrupt slot");
                None
            }
        }
    }
}

fn encode<T: Serialize>(key: &str, value: &T) -> Result<String, StorageError> {
    serde_json::to_string(value).map_err(|e| StorageError::Write {
        key: key.to_string(),
        message: e.to_string(),
    })
}
