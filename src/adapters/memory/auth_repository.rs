//! In-memory auth repository.
//!
//! Issues sessions for the fixture accounts and tracks every active session
//! by its access token. `HttpAuthRepository` also records remotely issued
//! sessions here so that later lookups can be answered locally.

use async_trait::async_trait;
use rand::distributions::Alphanumeric;
use rand::Rng;
use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::fixtures::{self, FixtureCredential};
use crate::domain::auth::AuthSession;
use crate::domain::foundation::{Email, Timestamp, UserId};
use crate::ports::{AuthRepository, Clock, RepositoryError};

/// Lifetime of sessions issued offline.
pub const DEFAULT_SESSION_TTL_MS: u64 = 24 * 60 * 60 * 1000;

pub struct InMemoryAuthRepository {
    credentials: Vec<FixtureCredential>,
    sessions: RwLock<HashMap<String, AuthSession>>,
    clock: Arc<dyn Clock>,
    session_ttl: chrono::Duration,
}

impl InMemoryAuthRepository {
    /// Repository accepting the fixture accounts.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_credentials(clock, fixtures::credentials())
    }

    pub fn with_credentials(clock: Arc<dyn Clock>, credentials: Vec<FixtureCredential>) -> Self {
        Self {
            credentials,
            sessions: RwLock::new(HashMap::new()),
            clock,
            session_ttl: chrono::Duration::milliseconds(DEFAULT_SESSION_TTL_MS as i64),
        }
    }

    pub fn with_session_ttl(mut self, ttl: std::time::Duration) -> Self {
        self.session_ttl = chrono::Duration::milliseconds(ttl.as_millis() as i64);
        self
    }

    /// Track a session issued elsewhere.
    pub async fn remember(&self, session: AuthSession) {
        self.sessions
            .write()
            .await
            .insert(session.token().to_string(), session);
    }

    /// Replace the session that owned `refresh_token` with `session`.
    pub async fn replace_refreshed(&self, refresh_token: &str, session: AuthSession) {
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, s| s.refresh_token() != refresh_token);
        sessions.insert(session.token().to_string(), session);
    }

    /// Drop every session of the user.
    pub async fn forget_user(&self, user_id: &UserId) {
        self.sessions
            .write()
            .await
            .retain(|_, s| s.user_id() != user_id);
    }

    /// Still-valid session registered under `token`.
    pub async fn active_session(&self, token: &str) -> Option<AuthSession> {
        let now = self.clock.now();
        self.sessions
            .read()
            .await
            .get(token)
            .filter(|s| s.is_valid_at(&now))
            .cloned()
    }

    /// Drop the session under `token` if it has expired.
    pub async fn forget_expired(&self, token: &str) {
        let now = self.clock.now();
        let mut sessions = self.sessions.write().await;
        if sessions.get(token).is_some_and(|s| s.is_expired_at(&now)) {
            sessions.remove(token);
        }
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    fn issue(&self, user_id: UserId, email: Email) -> AuthSession {
        let now = self.clock.now();
        AuthSession::reconstitute(
            user_id,
            email,
            random_token("token", &now),
            random_token("refresh", &now),
            now.plus(self.session_ttl),
            now,
        )
    }
}

impl std::fmt::Debug for InMemoryAuthRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryAuthRepository")
            .field("accounts", &self.credentials.len())
            .field("session_ttl", &self.session_ttl)
            .finish()
    }
}

#[async_trait]
impl AuthRepository for InMemoryAuthRepository {
    async fn authenticate(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<Option<AuthSession>, RepositoryError> {
        let account = self
            .credentials
            .iter()
            .find(|c| &c.email == email && c.password == password.expose_secret().as_str());

        let Some(account) = account else {
            return Ok(None);
        };

        let session = self.issue(account.user_id.clone(), email.clone());
        self.remember(session.clone()).await;
        Ok(Some(session))
    }

    async fn refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<Option<AuthSession>, RepositoryError> {
        let now = self.clock.now();
        let existing = self
            .sessions
            .read()
            .await
            .values()
            .find(|s| s.refresh_token() == refresh_token)
            .cloned();

        let Some(existing) = existing.filter(|s| s.is_valid_at(&now)) else {
            return Ok(None);
        };

        let rotated = self.issue(existing.user_id().clone(), existing.email().clone());
        let mut sessions = self.sessions.write().await;
        sessions.remove(existing.token());
        sessions.insert(rotated.token().to_string(), rotated.clone());
        Ok(Some(rotated))
    }

    async fn logout(&self, user_id: &UserId) -> Result<(), RepositoryError> {
        self.forget_user(user_id).await;
        Ok(())
    }

    async fn current_session(&self, token: &str) -> Result<Option<AuthSession>, RepositoryError> {
        match self.active_session(token).await {
            Some(session) => Ok(Some(session)),
            None => {
                self.forget_expired(token).await;
                Ok(None)
            }
        }
    }
}

fn random_token(prefix: &str, now: &Timestamp) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect();
    format!(
        "{prefix}_{}_{}",
        suffix.to_lowercase(),
        now.as_datetime().timestamp_millis()
    )
}
