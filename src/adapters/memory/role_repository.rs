//! In-memory role repository.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::fixtures;
use crate::domain::foundation::RoleId;
use crate::domain::role::Role;
use crate::ports::{RepositoryError, RoleRepository};

#[derive(Debug, Default)]
pub struct InMemoryRoleRepository {
    roles: RwLock<Vec<Role>>,
}

impl InMemoryRoleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository seeded with the fixture roles.
    pub fn with_fixtures() -> Self {
        Self::with_roles(fixtures::roles())
    }

    pub fn with_roles(roles: Vec<Role>) -> Self {
        Self {
            roles: RwLock::new(roles),
        }
    }

    pub async fn len(&self) -> usize {
        self.roles.read().await.len()
    }
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn find_by_id(&self, id: &RoleId) -> Result<Option<Role>, RepositoryError> {
        let roles = self.roles.read().await;
        Ok(roles.iter().find(|r| r.id() == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, RepositoryError> {
        let roles = self.roles.read().await;
        Ok(roles.iter().find(|r| r.name() == name).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Role>, RepositoryError> {
        Ok(self.roles.read().await.clone())
    }

    async fn save(&self, role: &Role) -> Result<Role, RepositoryError> {
        let mut roles = self.roles.write().await;
        match roles.iter_mut().find(|r| r.id() == role.id()) {
            Some(existing) => *existing = role.clone(),
            None => roles.push(role.clone()),
        }
        Ok(role.clone())
    }

    async fn delete(&self, id: &RoleId) -> Result<(), RepositoryError> {
        self.roles.write().await.retain(|r| r.id() != id);
        Ok(())
    }
}
