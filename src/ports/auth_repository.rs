//! Auth repository port.
//!
//! Issues, refreshes and revokes sessions. A `None` result means the
//! credentials or token were not accepted.

use crate::domain::auth::AuthSession;
use crate::domain::foundation::{Email, UserId};
use async_trait::async_trait;
use secrecy::SecretString;

use super::RepositoryError;

#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Exchange credentials for a session.
    async fn authenticate(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<Option<AuthSession>, RepositoryError>;

    /// Exchange a refresh token for a new session.
    async fn refresh_token(&self, refresh_token: &str)
        -> Result<Option<AuthSession>, RepositoryError>;

    /// Revoke every session of the user.
    async fn logout(&self, user_id: &UserId) -> Result<(), RepositoryError>;

    /// Resolve the session that owns `token`.
    async fn current_session(&self, token: &str) -> Result<Option<AuthSession>, RepositoryError>;
}
