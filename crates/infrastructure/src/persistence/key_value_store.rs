//! File-backed key/value store.
//!
//! Each slot is one file named after its key under a storage directory:
//! - Linux: ~/.local/share/easytest/storage/
//! - macOS: ~/Library/Application Support/easytest/storage/
//! - Windows: %APPDATA%/easytest/storage/

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use easytest_application::ports::{FileSystem, FileSystemError, KeyValueStore, StorageError};

use crate::persistence::TokioFileSystem;

/// Key/value slots stored as files.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore<F: FileSystem = TokioFileSystem> {
    fs: F,
    root: PathBuf,
}

impl FileKeyValueStore<TokioFileSystem> {
    /// Opens a store under `root` on the real file system.
    #[must_use]
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self::new(TokioFileSystem::new(), root)
    }

    /// Returns the platform default storage directory.
    #[must_use]
    pub fn default_root() -> Option<PathBuf> {
        dirs::data_dir().map(|p| p.join("easytest").join("storage"))
    }
}

impl<F: FileSystem> FileKeyValueStore<F> {
    /// Creates a store with a custom file system.
    pub fn new(fs: F, root: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            root: root.into(),
        }
    }

    /// Directory holding the slot files.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing a slot. Characters outside `[A-Za-z0-9_-]` become `_`.
    fn slot_path(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{name}.json"))
    }
}

#[async_trait]
impl<F: FileSystem + 'static> KeyValueStore for FileKeyValueStore<F> {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self.fs.read_file_string(&self.slot_path(key)).await {
            Ok(content) => Ok(Some(content)),
            Err(FileSystemError::NotFound(_)) => Ok(None),
            Err(e) => Err(StorageError::Read {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key);
        tracing::debug!(key, path = %path.display(), "writing slot");
        self.fs
            .write_file(&path, value.as_bytes())
            .await
            .map_err(|e| StorageError::Write {
                key: key.to_string(),
                message: e.to_string(),
            })
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match self.fs.remove_file(&self.slot_path(key)).await {
            Ok(()) | Err(FileSystemError::NotFound(_)) => Ok(()),
            Err(e) => Err(StorageError::Write {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }
}
