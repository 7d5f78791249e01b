//! Authentication configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Authentication configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Lifetime of sessions issued by the offline fallback, in milliseconds
    #[serde(default = "default_offline_session_ttl")]
    pub offline_session_ttl_ms: u64,

    /// How close to expiry a stored token counts as near expiration
    #[serde(default = "default_refresh_window")]
    pub refresh_window_ms: u64,
}

impl AuthConfig {
    pub fn offline_session_ttl(&self) -> Duration {
        Duration::from_millis(self.offline_session_ttl_ms)
    }

    pub fn refresh_window(&self) -> Duration {
        Duration::from_millis(self.refresh_window_ms)
    }

    /// Validate authentication configuration
    ///
    /// The refresh window must be shorter than an offline session, or every
    /// fallback session would be near expiration from the start.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.offline_session_ttl_ms == 0 {
            return Err(ValidationError::InvalidSessionTtl);
        }
        if self.refresh_window_ms >= self.offline_session_ttl_ms {
            return Err(ValidationError::RefreshWindowTooLarge);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            offline_session_ttl_ms: default_offline_session_ttl(),
            refresh_window_ms: default_refresh_window(),
        }
    }
}

fn default_offline_session_ttl() -> u64 {
    24 * 60 * 60 * 1000
}

fn default_refresh_window() -> u64 {
    5 * 60 * 1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_config_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.offline_session_ttl(), Duration::from_secs(86_400));
        assert_eq!(config.refresh_window(), Duration::from_secs(300));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_zero_ttl() {
        let config = AuthConfig {
            offline_session_ttl_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidSessionTtl)
        ));
    }

    #[test]
    fn test_validation_window_must_be_shorter_than_ttl() {
        let config = AuthConfig {
            offline_session_ttl_ms: 60_000,
            refresh_window_ms: 60_000,
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::RefreshWindowTooLarge)
        ));
    }
}
