//! Remote auth repository with offline fallback.
//!
//! Every session obtained here, remote or offline, has its credentials
//! written to the token store; logout always clears them.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

use super::client::{ApiClient, TransportError};
use super::dto::{LoginRequest, LoginResponse, LogoutRequest, RefreshRequest};
use super::log_fallback;
use crate::adapters::memory::InMemoryAuthRepository;
use crate::adapters::storage::{TokenSet, TokenStore};
use crate::domain::auth::AuthSession;
use crate::domain::foundation::{Email, UserId};
use crate::ports::{AuthRepository, RepositoryError};

const AUTH: &str = "auth";
const LOGIN: &str = "login";
const LOGOUT: &str = "logout";
const REFRESH: &str = "refresh-token";
const CURRENT: &str = "current";

#[derive(Debug)]
pub struct HttpAuthRepository {
    api: Arc<ApiClient>,
    tokens: Arc<TokenStore>,
    local: InMemoryAuthRepository,
}

impl HttpAuthRepository {
    pub fn new(api: Arc<ApiClient>, tokens: Arc<TokenStore>, local: InMemoryAuthRepository) -> Self {
        Self { api, tokens, local }
    }

    pub fn local(&self) -> &InMemoryAuthRepository {
        &self.local
    }

    async fn remote_session(
        &self,
        request: impl std::future::Future<Output = Result<LoginResponse, TransportError>>,
    ) -> Result<AuthSession, TransportError> {
        Ok(request.await?.into_session()?)
    }

    fn store_tokens(&self, session: &AuthSession) {
        let tokens = TokenSet {
            access_token: session.token().to_string(),
            refresh_token: session.refresh_token().to_string(),
            expires_at: *session.expires_at(),
        };
        if let Err(e) = self.tokens.set_tokens(&tokens) {
            tracing::warn!(error = %e, "Failed to persist session tokens");
        }
    }
}

#[async_trait]
impl AuthRepository for HttpAuthRepository {
    async fn authenticate(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<Option<AuthSession>, RepositoryError> {
        let body = LoginRequest {
            email: email.as_str(),
            password: password.expose_secret(),
        };
        let remote = self
            .remote_session(self.api.post(&[AUTH, LOGIN], &body))
            .await;

        let session = match remote {
            Ok(session) => {
                self.local.remember(session.clone()).await;
                Some(session)
            }
            Err(e) => {
                log_fallback("auth.authenticate", &e);
                self.local.authenticate(email, password).await?
            }
        };

        if let Some(session) = &session {
            self.store_tokens(session);
        }
        Ok(session)
    }

    async fn refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<Option<AuthSession>, RepositoryError> {
        let body = RefreshRequest { refresh_token };
        let remote = self
            .remote_session(self.api.post(&[AUTH, REFRESH], &body))
            .await;

        let session = match remote {
            Ok(session) => {
                self.local
                    .replace_refreshed(refresh_token, session.clone())
                    .await;
                Some(session)
            }
            Err(e) => {
                log_fallback("auth.refresh_token", &e);
                self.local.refresh_token(refresh_token).await?
            }
        };

        if let Some(session) = &session {
            self.store_tokens(session);
        }
        Ok(session)
    }

    async fn logout(&self, user_id: &UserId) -> Result<(), RepositoryError> {
        let body = LogoutRequest {
            user_id: user_id.as_str(),
        };
        if let Err(e) = self.api.post_ack(&[AUTH, LOGOUT], &body).await {
            log_fallback("auth.logout", &e);
        }

        if let Err(e) = self.tokens.clear() {
            tracing::warn!(error = %e, "Failed to clear session tokens");
        }
        self.local.logout(user_id).await
    }

    async fn current_session(&self, token: &str) -> Result<Option<AuthSession>, RepositoryError> {
        if let Some(session) = self.local.active_session(token).await {
            return Ok(Some(session));
        }

        match self
            .remote_session(self.api.get_as(&[AUTH, CURRENT], token))
            .await
        {
            Ok(session) => {
                self.local.remember(session.clone()).await;
                Ok(Some(session))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Session check against admin API failed");
                self.local.forget_expired(token).await;
                Ok(None)
            }
        }
    }
}
