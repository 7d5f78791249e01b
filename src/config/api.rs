//! Admin API client configuration

use serde::Deserialize;
use std::time::Duration;

use super::environment::Environment;
use super::error::ValidationError;

/// Longest accepted request timeout
const MAX_TIMEOUT_MS: u64 = 60_000;

/// Admin API client configuration
///
/// Both fields fall back to the defaults of the selected [`Environment`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: Option<String>,

    /// Per-request timeout in milliseconds
    pub timeout_ms: Option<u64>,
}

impl ApiConfig {
    /// Configured base URL, or the environment default
    pub fn base_url(&self, environment: Environment) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| environment.default_api_base_url())
    }

    /// Configured timeout, or the environment default
    pub fn timeout(&self, environment: Environment) -> Duration {
        Duration::from_millis(
            self.timeout_ms
                .unwrap_or_else(|| environment.default_api_timeout_ms()),
        )
    }

    /// Validate API configuration
    ///
    /// In production, requires HTTPS for the base URL.
    pub fn validate(&self, environment: Environment) -> Result<(), ValidationError> {
        let base_url = self.base_url(environment);
        if base_url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("API_BASE_URL"));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ValidationError::InvalidApiUrl);
        }
        if environment.is_production() && !base_url.starts_with("https://") {
            return Err(ValidationError::ApiMustBeHttps);
        }

        let timeout_ms = self.timeout(environment).as_millis();
        if timeout_ms == 0 || timeout_ms > u128::from(MAX_TIMEOUT_MS) {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_environment() {
        let config = ApiConfig::default();
        assert_eq!(
            config.base_url(Environment::Qa),
            "https://api-qa.tudominio.com/api"
        );
        assert_eq!(
            config.timeout(Environment::Staging),
            Duration::from_millis(6_000)
        );
    }

    #[test]
    fn test_explicit_values_win() {
        let config = ApiConfig {
            base_url: Some("http://127.0.0.1:9000/api".to_string()),
            timeout_ms: Some(1_500),
        };
        assert_eq!(
            config.base_url(Environment::Production),
            "http://127.0.0.1:9000/api"
        );
        assert_eq!(
            config.timeout(Environment::Production),
            Duration::from_millis(1_500)
        );
    }

    #[test]
    fn test_validation_defaults_are_valid() {
        for env in [
            Environment::Development,
            Environment::Qa,
            Environment::Staging,
            Environment::Production,
        ] {
            assert!(ApiConfig::default().validate(env).is_ok(), "{env}");
        }
    }

    #[test]
    fn test_validation_rejects_non_http_url() {
        let config = ApiConfig {
            base_url: Some("ftp://example.com".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(Environment::Development),
            Err(ValidationError::InvalidApiUrl)
        ));
    }

    #[test]
    fn test_validation_rejects_empty_url() {
        let config = ApiConfig {
            base_url: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(config.validate(Environment::Development).is_err());
    }

    #[test]
    fn test_validation_production_requires_https() {
        let config = ApiConfig {
            base_url: Some("http://api.example.com".to_string()),
            ..Default::default()
        };
        // Allowed in development
        assert!(config.validate(Environment::Development).is_ok());
        // Rejected in production
        assert!(matches!(
            config.validate(Environment::Production),
            Err(ValidationError::ApiMustBeHttps)
        ));
    }

    #[test]
    fn test_validation_invalid_timeout() {
        let config = ApiConfig {
            timeout_ms: Some(0),
            ..Default::default()
        };
        assert!(config.validate(Environment::Development).is_err());

        let config = ApiConfig {
            timeout_ms: Some(60_001),
            ..Default::default()
        };
        assert!(config.validate(Environment::Development).is_err());
    }
}
