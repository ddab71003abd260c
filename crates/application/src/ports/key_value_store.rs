//! Key/value storage port
//!
//! The local-storage equivalent: string blobs under fixed keys.

use async_trait::async_trait;

/// Errors raised by a key/value store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading a slot failed.
    #[error("failed to read '{key}': {message}")]
    Read {
        /// Slot key.
        key: String,
        /// Underlying failure.
        message: String,
    },

    /// Writing or removing a slot failed.
    #[error("failed to write '{key}': {message}")]
    Write {
        /// Slot key.
        key: String,
        /// Underlying failure.
        message: String,
    },

    /// A slot holds data that cannot be decoded.
    #[error("corrupt data in '{key}': {message}")]
    Corrupt {
        /// Slot key.
        key: String,
        /// Decoder message.
        message: String,
    },
}

/// String slots keyed by name.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the slot content, or `None` when the slot is empty.
    ///
    /// # Errors
    /// Returns `StorageError::Read` if the backing store cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the slot content.
    ///
    /// # Errors
    /// Returns `StorageError::Write` if the value cannot be stored.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Empties the slot. Removing an empty slot succeeds.
    ///
    /// # Errors
    /// Returns `StorageError::Write` if the slot cannot be removed.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
