//! Storage trait definitions.
//!
//! These traits define the interface for storage backends, enabling swapping
//! between different implementations without changing business logic.
//!
//! Records are stored as raw JSON so that older shapes survive a load and can
//! be upgraded by the service layer.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::ResourceKind;
use crate::error::StorageResult;

/// Record storage operations.
///
/// Records are keyed by kind and name. Names are validated before they reach
/// storage.
#[async_trait]
pub trait ResourceStorage: Send + Sync {
    /// Store a record only if no record with that name exists.
    ///
    /// Returns `false` without writing if the name is taken.
    async fn insert(&self, kind: ResourceKind, name: &str, record: &Value) -> StorageResult<bool>;

    /// Store a record, replacing any existing one.
    async fn save(&self, kind: ResourceKind, name: &str, record: &Value) -> StorageResult<()>;

    /// Load a record.
    async fn load(&self, kind: ResourceKind, name: &str) -> StorageResult<Option<Value>>;

    /// List record names of a kind, sorted.
    async fn list_names(&self, kind: ResourceKind) -> StorageResult<Vec<String>>;

    /// Delete a record. Returns whether it existed.
    async fn delete(&self, kind: ResourceKind, name: &str) -> StorageResult<bool>;
}

/// Combined storage trait.
#[async_trait]
pub trait Storage: ResourceStorage {
    /// Check if the storage backend is healthy and reachable.
    async fn health_check(&self) -> StorageResult<()>;

    /// Get the storage backend name.
    fn backend_name(&self) -> &'static str;
}
