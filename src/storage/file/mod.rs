//! File-based storage backend.
//!
//! This backend stores each record as a JSON file with file locking.
//! Suitable for development and single-node deployments.
//!
//! Directory structure:
//! ```text
//! data/
//! └── records/
//!     ├── string/
//!     │   └── {name}.json
//!     ├── password/
//!     │   └── {name}.json
//!     └── id/
//!         └── {name}.json
//! ```

mod records;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;

use crate::config::FileStorageConfig;
use crate::domain::ResourceKind;
use crate::error::{StorageError, StorageResult};
use crate::storage::traits::{ResourceStorage, Storage};

pub use records::FileRecordStorage;

/// File-based storage implementation.
pub struct FileStorage {
    /// Base data directory.
    base_dir: PathBuf,
    /// Record storage.
    record_storage: FileRecordStorage,
}

impl FileStorage {
    /// Create a new file storage instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directories cannot be created.
    pub fn new(config: &FileStorageConfig) -> StorageResult<Self> {
        let base_dir = config.data_dir.clone();

        Self::ensure_directories(&base_dir)?;

        Ok(Self {
            record_storage: FileRecordStorage::new(base_dir.join("records")),
            base_dir,
        })
    }

    fn ensure_directories(base_dir: &Path) -> StorageResult<()> {
        let records_dir = base_dir.join("records");
        let dirs = std::iter::once(records_dir.clone())
            .chain(ResourceKind::ALL.iter().map(|kind| records_dir.join(kind.as_str())));

        for dir in dirs {
            std::fs::create_dir_all(&dir).map_err(|e| {
                StorageError::FileIO(format!("Failed to create directory {}: {e}", dir.display()))
            })?;
        }

        Ok(())
    }
}

#[async_trait]
impl ResourceStorage for FileStorage {
    async fn insert(&self, kind: ResourceKind, name: &str, record: &Value) -> StorageResult<bool> {
        self.record_storage.insert(kind, name, record).await
    }

    async fn save(&self, kind: ResourceKind, name: &str, record: &Value) -> StorageResult<()> {
        self.record_storage.save(kind, name, record).await
    }

    async fn load(&self, kind: ResourceKind, name: &str) -> StorageResult<Option<Value>> {
        self.record_storage.load(kind, name).await
    }

    async fn list_names(&self, kind: ResourceKind) -> StorageResult<Vec<String>> {
        self.record_storage.list_names(kind).await
    }

    async fn delete(&self, kind: ResourceKind, name: &str) -> StorageResult<bool> {
        self.record_storage.delete(kind, name).await
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn health_check(&self) -> StorageResult<()> {
        if !self.base_dir.exists() {
            return Err(StorageError::Unavailable);
        }

        // Probe write access
        let test_file = self.base_dir.join(".health_check");
        tokio::fs::write(&test_file, b"ok")
            .await
            .map_err(|e| StorageError::FileIO(format!("Health check failed: {e}")))?;
        tokio::fs::remove_file(&test_file)
            .await
            .map_err(|e| StorageError::FileIO(format!("Health check cleanup failed: {e}")))?;

        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
