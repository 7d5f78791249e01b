//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `ADMIN_CONSOLE__` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use admin_console::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Admin API at {}", config.api_base_url());
//! ```

mod api;
mod auth;
mod environment;
mod error;
mod logging;
mod storage;

pub use api::ApiConfig;
pub use auth::AuthConfig;
pub use environment::Environment;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use storage::StorageConfig;

use serde::Deserialize;
use std::time::Duration;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// development configuration. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Deployment environment (selects API defaults)
    #[serde(default)]
    pub environment: Environment,

    /// Admin API endpoint and timeout
    #[serde(default)]
    pub api: ApiConfig,

    /// Session lifetimes
    #[serde(default)]
    pub auth: AuthConfig,

    /// Durable client storage
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `ADMIN_CONSOLE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `ADMIN_CONSOLE__ENVIRONMENT=qa` -> `environment = qa`
    /// - `ADMIN_CONSOLE__API__TIMEOUT_MS=3000` -> `api.timeout_ms = 3000`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ADMIN_CONSOLE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.api.validate(self.environment)?;
        self.auth.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    pub fn api_base_url(&self) -> &str {
        self.api.base_url(self.environment)
    }

    pub fn api_timeout(&self) -> Duration {
        self.api.timeout(self.environment)
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}
