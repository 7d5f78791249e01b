//! Role repository port.

use crate::domain::foundation::RoleId;
use crate::domain::role::Role;
use async_trait::async_trait;

use super::RepositoryError;

/// Repository port for Role aggregate persistence.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Find a role by its ID.
    async fn find_by_id(&self, id: &RoleId) -> Result<Option<Role>, RepositoryError>;

    /// Find a role by its exact name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, RepositoryError>;

    /// List every role.
    async fn find_all(&self) -> Result<Vec<Role>, RepositoryError>;

    /// Insert or update a role, matched by id. Returns the stored role.
    async fn save(&self, role: &Role) -> Result<Role, RepositoryError>;

    /// Delete a role. Deleting an unknown id is not an error.
    async fn delete(&self, id: &RoleId) -> Result<(), RepositoryError>;

    /// Check whether a role with this name exists.
    async fn exists_by_name(&self, name: &str) -> Result<bool, RepositoryError> {
        Ok(self.find_by_name(name).await?.is_some())
    }
}
