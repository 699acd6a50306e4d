//! In-process storage backend.
//!
//! Records live in a concurrent map and are lost on restart.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::Value;

use crate::domain::ResourceKind;
use crate::error::StorageResult;
use crate::storage::traits::{ResourceStorage, Storage};

/// Memory-backed storage implementation.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: DashMap<(ResourceKind, String), Value>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResourceStorage for MemoryStorage {
    async fn insert(&self, kind: ResourceKind, name: &str, record: &Value) -> StorageResult<bool> {
        match self.records.entry((kind, name.to_string())) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(true)
            }
        }
    }

    async fn save(&self, kind: ResourceKind, name: &str, record: &Value) -> StorageResult<()> {
        self.records
            .insert((kind, name.to_string()), record.clone());
        Ok(())
    }

    async fn load(&self, kind: ResourceKind, name: &str) -> StorageResult<Option<Value>> {
        Ok(self
            .records
            .get(&(kind, name.to_string()))
            .map(|entry| entry.value().clone()))
    }

    async fn list_names(&self, kind: ResourceKind) -> StorageResult<Vec<String>> {
        let mut names: Vec<String> = self
            .records
            .iter()
            .filter(|entry| entry.key().0 == kind)
            .map(|entry| entry.key().1.clone())
            .collect();
        names.sort();
        Ok(names)
    }

    async fn delete(&self, kind: ResourceKind, name: &str) -> StorageResult<bool> {
        Ok(self.records.remove(&(kind, name.to_string())).is_some())
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn health_check(&self) -> StorageResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
