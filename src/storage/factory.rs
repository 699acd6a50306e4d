//! Storage backend factory.
//!
//! Creates the appropriate storage backend based on configuration.

use std::sync::Arc;

use crate::config::{StorageBackend, StorageConfig};
use crate::error::AppError;
use crate::storage::file::FileStorage;
use crate::storage::memory::MemoryStorage;
use crate::storage::traits::Storage;

/// Create a storage backend based on configuration.
///
/// # Errors
///
/// Returns an error if the storage backend cannot be initialized.
pub async fn create_storage(config: &StorageConfig) -> Result<Arc<dyn Storage>, AppError> {
    match config.backend {
        StorageBackend::File => {
            let storage = FileStorage::new(&config.file)?;

            // Verify storage is healthy
            storage.health_check().await?;

            Ok(Arc::new(storage))
        }
        StorageBackend::Memory => Ok(Arc::new(MemoryStorage::new())),
    }
}
