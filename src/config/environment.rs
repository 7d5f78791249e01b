//! Deployment environment

use serde::Deserialize;
use std::fmt;

/// Deployment environment
///
/// Selects the defaults for the admin API endpoint and timeout.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Qa,
    Staging,
    Production,
}

impl Environment {
    /// Admin API base URL used when none is configured
    pub fn default_api_base_url(&self) -> &'static str {
        match self {
            Environment::Development => "http://localhost:3000/api",
            Environment::Qa => "https://api-qa.tudominio.com/api",
            Environment::Staging => "https://api-staging.tudominio.com/api",
            Environment::Production => "https://api.tudominio.com/api",
        }
    }

    /// Request timeout in milliseconds used when none is configured
    pub fn default_api_timeout_ms(&self) -> u64 {
        match self {
            Environment::Development => 5_000,
            Environment::Qa => 8_000,
            Environment::Staging => 6_000,
            Environment::Production => 5_000,
        }
    }

    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Qa => "qa",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_development() {
        assert_eq!(Environment::default(), Environment::Development);
    }

    #[test]
    fn test_api_defaults_per_environment() {
        assert_eq!(
            Environment::Development.default_api_base_url(),
            "http://localhost:3000/api"
        );
        assert_eq!(Environment::Qa.default_api_timeout_ms(), 8_000);
        assert_eq!(Environment::Staging.default_api_timeout_ms(), 6_000);
        assert!(Environment::Production
            .default_api_base_url()
            .starts_with("https://"));
    }

    #[test]
    fn test_is_production() {
        assert!(Environment::Production.is_production());
        assert!(!Environment::Staging.is_production());
    }

    #[test]
    fn test_deserializes_lowercase() {
        let env: Environment = serde_json::from_str("\"qa\"").unwrap();
        assert_eq!(env, Environment::Qa);
    }
}
