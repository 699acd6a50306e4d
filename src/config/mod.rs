//! Configuration management module.
//!
//! Supports loading configuration from:
//! - TOML files (config/default.toml, config/{profile}.toml)
//! - A `.env` file in the working directory
//! - Environment variables with `RANDOM_WORKER__<SECTION>__<KEY>` pattern

mod server;
mod storage;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub use server::ServerConfig;
pub use storage::{FileStorageConfig, StorageBackend, StorageConfig};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Storage backend configuration.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Generation limits and hashing configuration.
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Authentication configuration.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Load configuration from files and environment.
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. `config/default.toml`
    /// 2. `config/{RANDOM_PROFILE}.toml` (if `RANDOM_PROFILE` is set)
    /// 3. Environment variables with `RANDOM_WORKER__` prefix
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env file is fine
        dotenvy::dotenv().ok();

        let profile =
            std::env::var("RANDOM_PROFILE").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{profile}")).required(false))
            // RANDOM_WORKER__SERVER__PORT=8080 -> server.port = 8080
            .add_source(
                Environment::with_prefix("RANDOM_WORKER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: Self = config.try_deserialize()?;
        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("server.port cannot be 0".to_string()));
        }

        self.storage.validate()?;
        self.generator.validate()?;

        if self.auth.admin_token.is_empty() {
            return Err(ConfigError::Message(
                "auth.admin_token cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Generation limits and password hashing.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    /// Largest string/password length accepted.
    #[serde(default = "default_max_length")]
    pub max_length: u32,

    /// Largest identifier byte length accepted.
    #[serde(default = "default_max_byte_length")]
    pub max_byte_length: u32,

    /// bcrypt cost for password hashes.
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

const fn default_max_length() -> u32 {
    4096
}

const fn default_max_byte_length() -> u32 {
    1024
}

const fn default_bcrypt_cost() -> u32 {
    10
}

impl GeneratorConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_length == 0 {
            return Err(ConfigError::Message(
                "generator.max_length cannot be 0".to_string(),
            ));
        }
        if self.max_byte_length == 0 {
            return Err(ConfigError::Message(
                "generator.max_byte_length cannot be 0".to_string(),
            ));
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::Message(format!(
                "generator.bcrypt_cost must be 4-31, got {}",
                self.bcrypt_cost
            )));
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_length: default_max_length(),
            max_byte_length: default_max_byte_length(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Bearer token required on every `/v1` route.
    #[serde(default = "default_admin_token")]
    pub admin_token: String,
}

fn default_admin_token() -> String {
    "admin_change_me_in_production".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_token: default_admin_token(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format: "text" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Install the Prometheus recorder behind `/metrics`.
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

const fn default_metrics_enabled() -> bool {
    true
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
            metrics_enabled: default_metrics_enabled(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.generator.bcrypt_cost, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_bcrypt_cost() {
        let mut config = AppConfig::default();
        config.generator.bcrypt_cost = 3;
        assert!(config.validate().is_err());

        config.generator.bcrypt_cost = 32;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_limits_rejected() {
        let mut config = AppConfig::default();
        config.generator.max_length = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.generator.max_byte_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_admin_token_rejected() {
        let mut config = AppConfig::default();
        config.auth.admin_token = String::new();
        assert!(config.validate().is_err());
    }
}
