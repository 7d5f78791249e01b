//! User repository port.
//!
//! Defines the contract for persisting and retrieving User aggregates and
//! their role assignments.

use crate::domain::foundation::{Email, RoleId, UserId};
use crate::domain::user::User;
use async_trait::async_trait;

use super::RepositoryError;

/// Repository port for User aggregate persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;

    /// Find a user by (normalized) email.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError>;

    /// List every user.
    async fn find_all(&self) -> Result<Vec<User>, RepositoryError>;

    /// Insert or update a user, matched by id. Returns the stored user.
    async fn save(&self, user: &User) -> Result<User, RepositoryError>;

    /// Delete a user. Deleting an unknown id is not an error.
    async fn delete(&self, id: &UserId) -> Result<(), RepositoryError>;

    /// Check whether any user has this email.
    async fn exists_by_email(&self, email: &Email) -> Result<bool, RepositoryError> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    /// Replace the user's role assignments in a single call.
    async fn assign_roles(&self, user_id: &UserId, role_ids: &[RoleId])
        -> Result<(), RepositoryError>;

    /// Role ids currently assigned to the user.
    async fn user_roles(&self, user_id: &UserId) -> Result<Vec<RoleId>, RepositoryError>;
}
