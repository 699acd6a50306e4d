//! Application state for Axum handlers.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::AppConfig;
use crate::random::SecureRandom;
use crate::service::{IdService, StringService};
use crate::storage::traits::Storage;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Storage backend.
    pub storage: Arc<dyn Storage>,
    /// Secure random source shared by all generators.
    pub random: SecureRandom,
    /// Random string service.
    pub string_service: Arc<StringService>,
    /// Random password service.
    pub password_service: Arc<StringService>,
    /// Random id service.
    pub id_service: Arc<IdService>,
    /// Prometheus handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new application state backed by the OS random source.
    pub fn new(config: Arc<AppConfig>, storage: Arc<dyn Storage>) -> Self {
        Self::with_random(config, storage, SecureRandom::os())
    }

    /// Create a new application state with a specific random source.
    pub fn with_random(
        config: Arc<AppConfig>,
        storage: Arc<dyn Storage>,
        random: SecureRandom,
    ) -> Self {
        let string_service = Arc::new(StringService::strings(
            Arc::clone(&storage),
            random.clone(),
            &config.generator,
        ));

        let password_service = Arc::new(StringService::passwords(
            Arc::clone(&storage),
            random.clone(),
            &config.generator,
        ));

        let id_service = Arc::new(IdService::new(
            Arc::clone(&storage),
            random.clone(),
            &config.generator,
        ));

        Self {
            config,
            storage,
            random,
            string_service,
            password_service,
            id_service,
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for `/metrics`.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
