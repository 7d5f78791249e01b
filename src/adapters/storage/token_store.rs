//! Token Store
//!
//! Keeps the bearer credentials of the current session in durable storage
//! under three flat keys. The HTTP client reads the access token from here
//! for every request; the auth adapter writes it after each successful
//! authenticate or refresh and clears it on logout.

use std::sync::Arc;

use chrono::Duration;

use crate::domain::foundation::Timestamp;
use crate::ports::{Clock, KeyValueStore, StorageError};

pub const ACCESS_TOKEN_KEY: &str = "app_access_token";
pub const REFRESH_TOKEN_KEY: &str = "app_refresh_token";
pub const EXPIRES_AT_KEY: &str = "app_token_expires_at";

/// Default window before expiry in which a token counts as near expiration.
pub const DEFAULT_REFRESH_WINDOW_MS: u64 = 5 * 60 * 1000;

/// Credentials issued together by a login or refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSet {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: Timestamp,
}

/// Durable holder of the current bearer credentials.
pub struct TokenStore {
    storage: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    refresh_window: Duration,
}

impl TokenStore {
    /// Creates the store and drops any persisted token that has already
    /// expired.
    pub fn new(storage: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let store = Self {
            storage,
            clock,
            refresh_window: Duration::milliseconds(DEFAULT_REFRESH_WINDOW_MS as i64),
        };

        if store.storage.get(ACCESS_TOKEN_KEY).is_some() && !store.has_valid_token() {
            tracing::debug!("Dropping expired persisted token");
            if let Err(e) = store.clear() {
                tracing::warn!(error = %e, "Failed to clear expired token");
            }
        }
        store
    }

    /// Sets how close to expiry a token counts as near expiration.
    pub fn with_refresh_window(mut self, window: std::time::Duration) -> Self {
        self.refresh_window = Duration::milliseconds(window.as_millis() as i64);
        self
    }

    pub fn set_tokens(&self, tokens: &TokenSet) -> Result<(), StorageError> {
        self.storage.set(ACCESS_TOKEN_KEY, &tokens.access_token)?;
        self.storage.set(REFRESH_TOKEN_KEY, &tokens.refresh_token)?;
        self.storage
            .set(EXPIRES_AT_KEY, &tokens.expires_at.to_rfc3339())?;
        Ok(())
    }

    /// Replaces only the access token, keeping the refresh token.
    pub fn set_access_token(
        &self,
        access_token: &str,
        expires_at: Timestamp,
    ) -> Result<(), StorageError> {
        self.storage.set(ACCESS_TOKEN_KEY, access_token)?;
        self.storage.set(EXPIRES_AT_KEY, &expires_at.to_rfc3339())?;
        Ok(())
    }

    pub fn current_token(&self) -> Option<String> {
        self.storage
            .get(ACCESS_TOKEN_KEY)
            .filter(|token| !token.is_empty())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.storage
            .get(REFRESH_TOKEN_KEY)
            .filter(|token| !token.is_empty())
    }

    /// Expiry of the access token. An unparseable value reads as absent.
    pub fn expires_at(&self) -> Option<Timestamp> {
        self.storage
            .get(EXPIRES_AT_KEY)
            .and_then(|raw| Timestamp::parse_rfc3339(&raw).ok())
    }

    /// A token is present and its expiry lies in the future.
    pub fn has_valid_token(&self) -> bool {
        if self.current_token().is_none() {
            return false;
        }
        match self.expires_at() {
            Some(expires_at) => self.clock.now().is_before(&expires_at),
            None => false,
        }
    }

    /// True when the expiry is unknown or falls inside the refresh window.
    pub fn is_near_expiration(&self) -> bool {
        match self.expires_at() {
            Some(expires_at) => expires_at <= self.clock.now().plus(self.refresh_window),
            None => true,
        }
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(ACCESS_TOKEN_KEY)?;
        self.storage.remove(REFRESH_TOKEN_KEY)?;
        self.storage.remove(EXPIRES_AT_KEY)?;
        Ok(())
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("has_token", &self.current_token().is_some())
            .field("refresh_window", &self.refresh_window)
            .finish()
    }
}
