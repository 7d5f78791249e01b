//! In-memory user repository.
//!
//! Keeps users in insertion order together with their role assignments.
//! Serves as the offline collection behind `HttpUserRepository`, and as a
//! standalone repository for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::fixtures;
use crate::domain::foundation::{Email, RoleId, UserId};
use crate::domain::user::User;
use crate::ports::{RepositoryError, UserRepository};

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
    user_roles: RwLock<HashMap<UserId, Vec<RoleId>>>,
}

impl InMemoryUserRepository {
    /// Empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository seeded with the fixture users.
    pub fn with_fixtures() -> Self {
        Self::with_users(fixtures::users())
    }

    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users),
            user_roles: RwLock::new(HashMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id() == id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email() == email).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.users.read().await.clone())
    }

    async fn save(&self, user: &User) -> Result<User, RepositoryError> {
        let mut users = self.users.write().await;
        match users.iter_mut().find(|u| u.id() == user.id()) {
            Some(existing) => *existing = user.clone(),
            None => users.push(user.clone()),
        }
        Ok(user.clone())
    }

    async fn delete(&self, id: &UserId) -> Result<(), RepositoryError> {
        self.users.write().await.retain(|u| u.id() != id);
        self.user_roles.write().await.remove(id);
        Ok(())
    }

    async fn assign_roles(
        &self,
        user_id: &UserId,
        role_ids: &[RoleId],
    ) -> Result<(), RepositoryError> {
        self.user_roles
            .write()
            .await
            .insert(user_id.clone(), role_ids.to_vec());
        Ok(())
    }

    async fn user_roles(&self, user_id: &UserId) -> Result<Vec<RoleId>, RepositoryError> {
        Ok(self
            .user_roles
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }
}
