//! String and password service.
//!
//! Strings and passwords share parameters, generation and storage layout.
//! Passwords additionally carry a bcrypt hash and never expose the result as
//! their id.

use std::sync::Arc;

use crate::config::GeneratorConfig;
use crate::domain::{ResourceKind, StringParams, StringRecord, Upgraded, upgrade_string_record};
use crate::error::{AppError, Result, StorageError};
use crate::random::{SecureRandom, StringGenerator};
use crate::service::hasher::PasswordHasher;
use crate::service::counters::{record_failure, record_generated};
use crate::storage::traits::{ResourceStorage, Storage};

/// Service for string or password resources.
pub struct StringService {
    /// Kind served: `String` or `Password`.
    kind: ResourceKind,
    /// Storage backend.
    storage: Arc<dyn Storage>,
    /// Constrained string generator.
    generator: StringGenerator,
    /// Present for passwords only.
    hasher: Option<PasswordHasher>,
    /// Largest accepted length.
    max_length: u32,
}

impl StringService {
    /// Create a service for random strings.
    pub fn strings(
        storage: Arc<dyn Storage>,
        random: SecureRandom,
        config: &GeneratorConfig,
    ) -> Self {
        Self {
            kind: ResourceKind::String,
            storage,
            generator: StringGenerator::new(random),
            hasher: None,
            max_length: config.max_length,
        }
    }

    /// Create a service for random passwords.
    pub fn passwords(
        storage: Arc<dyn Storage>,
        random: SecureRandom,
        config: &GeneratorConfig,
    ) -> Self {
        Self {
            kind: ResourceKind::Password,
            storage,
            generator: StringGenerator::new(random),
            hasher: Some(PasswordHasher::new(config.bcrypt_cost)),
            max_length: config.max_length,
        }
    }

    /// Generate and persist a new value.
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` for out-of-range parameters, `InvalidConstraint`
    /// when the minimums cannot be met, `EntropyUnavailable` when the random
    /// source fails, and `ResourceExists` if the name is taken.
    pub async fn create(&self, name: &str, params: StringParams) -> Result<StringRecord> {
        params
            .validate(self.max_length)
            .map_err(AppError::BadRequest)?;

        let result = self.generator.generate(&params.to_request()).map_err(|e| {
            record_failure(self.kind, &e);
            AppError::from(e)
        })?;

        let mut record =
            StringRecord::new(self.kind, name.to_string(), params, result.into_string());
        if let Some(hasher) = &self.hasher {
            record.bcrypt_hash = Some(hasher.hash(record.result.clone()).await?);
        }

        self.insert(&record).await?;
        record_generated(self.kind);

        tracing::info!(
            kind = %self.kind,
            name = %name,
            length = record.params.length,
            "Generated resource"
        );

        Ok(record)
    }

    /// Adopt an existing value without generating.
    ///
    /// # Errors
    ///
    /// Returns `ResourceExists` if the name is taken, or `HashFailed` if a
    /// password cannot be hashed.
    pub async fn import(&self, name: &str, value: String) -> Result<StringRecord> {
        let params = StringParams::imported(&value);
        let mut record = StringRecord::new(self.kind, name.to_string(), params, value);
        if let Some(hasher) = &self.hasher {
            record.bcrypt_hash = Some(hasher.hash(record.result.clone()).await?);
        }

        self.insert(&record).await?;

        tracing::info!(
            kind = %self.kind,
            name = %name,
            length = record.params.length,
            "Imported resource"
        );

        Ok(record)
    }

    /// Read a stored value, upgrading older records in place.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the name is unknown.
    pub async fn get(&self, name: &str) -> Result<StringRecord> {
        let value = self
            .storage
            .load(self.kind, name)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("{}/{name}", self.kind)))?;

        let Upgraded {
            mut record,
            from_version,
            mut changed,
        } = upgrade_string_record(self.kind, name, value).map_err(AppError::Internal)?;

        changed |= self.ensure_hash(&mut record, changed).await?;

        if changed {
            let value = serde_json::to_value(&record).map_err(StorageError::from)?;
            self.storage.save(self.kind, name, &value).await?;
            tracing::info!(
                kind = %self.kind,
                name = %name,
                from_version,
                to_version = record.schema_version,
                "Upgraded stored record"
            );
        }

        Ok(record)
    }

    /// Names of all stored values of this kind.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend fails.
    pub async fn list(&self) -> Result<Vec<String>> {
        Ok(self.storage.list_names(self.kind).await?)
    }

    /// Delete a stored value.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the name is unknown.
    pub async fn delete(&self, name: &str) -> Result<()> {
        if !self.storage.delete(self.kind, name).await? {
            return Err(AppError::ResourceNotFound(format!("{}/{name}", self.kind)));
        }

        tracing::info!(kind = %self.kind, name = %name, "Deleted resource");
        Ok(())
    }

    /// Make sure a password record carries a hash of its result.
    ///
    /// A missing hash is always computed. An existing hash is checked only
    /// when `verify` is set, and regenerated if it does not match. Returns
    /// whether the record changed.
    async fn ensure_hash(&self, record: &mut StringRecord, verify: bool) -> Result<bool> {
        let Some(hasher) = &self.hasher else {
            return Ok(false);
        };

        if let Some(hash) = &record.bcrypt_hash {
            if !verify || hasher.verify(record.result.clone(), hash.clone()).await {
                return Ok(false);
            }
            tracing::warn!(
                kind = %self.kind,
                name = %record.name,
                "Stored hash does not match result, regenerating"
            );
        }

        record.bcrypt_hash = Some(hasher.hash(record.result.clone()).await?);
        Ok(true)
    }

    async fn insert(&self, record: &StringRecord) -> Result<()> {
        let value = serde_json::to_value(record).map_err(StorageError::from)?;
        if self.storage.insert(self.kind, &record.name, &value).await? {
            Ok(())
        } else {
            Err(AppError::ResourceExists(format!("{}/{}", self.kind, record.name)))
        }
    }
}
