//! Identifier service.

use std::sync::Arc;

use crate::config::GeneratorConfig;
use crate::domain::{IdRecord, ResourceKind};
use crate::error::{AppError, Result, StorageError};
use crate::random::encoding::decode_base64_url;
use crate::random::{IdentifierBytes, IdentifierGenerator, SecureRandom};
use crate::service::counters::{record_failure, record_generated};
use crate::storage::traits::{ResourceStorage, Storage};

const KIND: ResourceKind = ResourceKind::Id;

/// Service for random identifier resources.
pub struct IdService {
    /// Storage backend.
    storage: Arc<dyn Storage>,
    /// Identifier byte generator.
    generator: IdentifierGenerator,
    /// Largest accepted byte length.
    max_byte_length: u32,
}

impl IdService {
    /// Create a new id service.
    pub fn new(storage: Arc<dyn Storage>, random: SecureRandom, config: &GeneratorConfig) -> Self {
        Self {
            storage,
            generator: IdentifierGenerator::new(random),
            max_byte_length: config.max_byte_length,
        }
    }

    /// Generate and persist a new identifier.
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` for a byte length outside `1..=max_byte_length`,
    /// `EntropyUnavailable` when the random source fails, and
    /// `ResourceExists` if the name is taken.
    pub async fn create(
        &self,
        name: &str,
        byte_length: u32,
        prefix: Option<String>,
    ) -> Result<IdRecord> {
        if byte_length == 0 || byte_length > self.max_byte_length {
            return Err(AppError::BadRequest(format!(
                "byte_length must be 1-{}, got {byte_length}",
                self.max_byte_length
            )));
        }

        let bytes = self
            .generator
            .generate(usize::try_from(byte_length).unwrap_or(usize::MAX))
            .map_err(|e| {
                record_failure(KIND, &e);
                AppError::from(e)
            })?;

        let record = IdRecord::from_bytes(name.to_string(), &bytes, non_empty(prefix));
        self.insert(&record).await?;
        record_generated(KIND);

        tracing::info!(name = %name, byte_length, "Generated identifier");

        Ok(record)
    }

    /// Adopt an existing identifier.
    ///
    /// `value` is `<prefix>,<b64url>`; the last comma separates the two, so
    /// the prefix may itself contain commas. Without a comma the whole value
    /// is the encoded id.
    ///
    /// # Errors
    ///
    /// Returns `ImportFailed` if the id part is not unpadded URL-safe base64,
    /// and `ResourceExists` if the name is taken.
    pub async fn import(&self, name: &str, value: &str) -> Result<IdRecord> {
        let (prefix, encoded) = match value.rsplit_once(',') {
            Some((prefix, encoded)) => (non_empty(Some(prefix.to_string())), encoded),
            None => (None, value),
        };

        let bytes = decode_base64_url(encoded)
            .map_err(|e| AppError::ImportFailed(format!("invalid id '{encoded}': {e}")))?;
        if bytes.is_empty() {
            return Err(AppError::ImportFailed("id is empty".to_string()));
        }

        let bytes = IdentifierBytes::from_vec(bytes);
        let record = IdRecord::from_bytes(name.to_string(), &bytes, prefix);
        self.insert(&record).await?;

        tracing::info!(name = %name, byte_length = record.byte_length, "Imported identifier");

        Ok(record)
    }

    /// Read a stored identifier.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the name is unknown.
    pub async fn get(&self, name: &str) -> Result<IdRecord> {
        let value = self
            .storage
            .load(KIND, name)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("{KIND}/{name}")))?;

        serde_json::from_value(value)
            .map_err(|e| AppError::Internal(format!("{KIND} record '{name}' is malformed: {e}")))
    }

    /// Names of all stored identifiers.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend fails.
    pub async fn list(&self) -> Result<Vec<String>> {
        Ok(self.storage.list_names(KIND).await?)
    }

    /// Delete a stored identifier.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the name is unknown.
    pub async fn delete(&self, name: &str) -> Result<()> {
        if !self.storage.delete(KIND, name).await? {
            return Err(AppError::ResourceNotFound(format!("{KIND}/{name}")));
        }

        tracing::info!(name = %name, "Deleted identifier");
        Ok(())
    }

    async fn insert(&self, record: &IdRecord) -> Result<()> {
        let value = serde_json::to_value(record).map_err(StorageError::from)?;
        if self.storage.insert(KIND, &record.name, &value).await? {
            Ok(())
        } else {
            Err(AppError::ResourceExists(format!("{KIND}/{}", record.name)))
        }
    }
}

fn non_empty(prefix: Option<String>) -> Option<String> {
    prefix.filter(|p| !p.is_empty())
}
