//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("API base URL must start with http:// or https://")]
    InvalidApiUrl,

    #[error("API base URL must use HTTPS in production")]
    ApiMustBeHttps,

    #[error("Invalid request timeout (must be 1..=60000 ms)")]
    InvalidTimeout,

    #[error("Offline session lifetime must be positive")]
    InvalidSessionTtl,

    #[error("Refresh window must be shorter than the offline session lifetime")]
    RefreshWindowTooLarge,

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}
