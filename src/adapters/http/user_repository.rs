//! Remote user repository with local fallback.

use async_trait::async_trait;
use std::sync::Arc;

use super::client::{ApiClient, TransportError};
use super::dto::{AssignRolesRequest, UserRequest, UserResponse, UserRolesResponse};
use super::log_fallback;
use crate::adapters::memory::InMemoryUserRepository;
use crate::domain::foundation::{Email, RoleId, UserId};
use crate::domain::user::User;
use crate::ports::{RepositoryError, UserRepository};

const USERS: &str = "users";
const CHECK_EMAIL: &str = "check-email";
const ROLES: &str = "roles";

/// Users served by the admin API, backed by an in-memory collection when
/// the API is unreachable or rejects a call.
#[derive(Debug)]
pub struct HttpUserRepository {
    api: Arc<ApiClient>,
    local: InMemoryUserRepository,
}

impl HttpUserRepository {
    /// Fallback collection seeded with the fixture users.
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self::with_local(api, InMemoryUserRepository::with_fixtures())
    }

    pub fn with_local(api: Arc<ApiClient>, local: InMemoryUserRepository) -> Self {
        Self { api, local }
    }

    pub fn local(&self) -> &InMemoryUserRepository {
        &self.local
    }

    async fn remote_user(&self, segments: &[&str]) -> Result<User, TransportError> {
        let dto: UserResponse = self.api.get(segments).await?;
        Ok(dto.into_user()?)
    }

    async fn remote_users(&self) -> Result<Vec<User>, TransportError> {
        let dtos: Vec<UserResponse> = self.api.get(&[USERS]).await?;
        dtos.into_iter()
            .map(|dto| dto.into_user().map_err(TransportError::from))
            .collect()
    }

    async fn remote_user_roles(&self, user_id: &UserId) -> Result<Vec<RoleId>, TransportError> {
        let dto: UserRolesResponse = self.api.get(&[USERS, user_id.as_str(), ROLES]).await?;
        Ok(dto.into_role_ids()?)
    }
}

#[async_trait]
impl UserRepository for HttpUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        match self.remote_user(&[USERS, id.as_str()]).await {
            Ok(user) => {
                self.local.save(&user).await?;
                return Ok(Some(user));
            }
            Err(e) => log_fallback("users.find_by_id", &e),
        }
        self.local.find_by_id(id).await
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        match self
            .remote_user(&[USERS, CHECK_EMAIL, email.as_str()])
            .await
        {
            Ok(user) => {
                self.local.save(&user).await?;
                return Ok(Some(user));
            }
            Err(e) => log_fallback("users.find_by_email", &e),
        }
        self.local.find_by_email(email).await
    }

    async fn find_all(&self) -> Result<Vec<User>, RepositoryError> {
        match self.remote_users().await {
            Ok(users) => {
                for user in &users {
                    self.local.save(user).await?;
                }
                return Ok(users);
            }
            Err(e) => log_fallback("users.find_all", &e),
        }
        self.local.find_all().await
    }

    async fn save(&self, user: &User) -> Result<User, RepositoryError> {
        let is_update = self.local.find_by_id(user.id()).await?.is_some();
        let body = UserRequest::from(user);

        let remote: Result<UserResponse, TransportError> = if is_update {
            self.api.put(&[USERS, user.id().as_str()], &body).await
        } else {
            self.api.post(&[USERS], &body).await
        };

        match remote.and_then(|dto| Ok(dto.into_user()?)) {
            Ok(saved) => return self.local.save(&saved).await,
            Err(e) => log_fallback("users.save", &e),
        }
        self.local.save(user).await
    }

    async fn delete(&self, id: &UserId) -> Result<(), RepositoryError> {
        if let Err(e) = self.api.delete(&[USERS, id.as_str()]).await {
            log_fallback("users.delete", &e);
        }
        self.local.delete(id).await
    }

    async fn assign_roles(
        &self,
        user_id: &UserId,
        role_ids: &[RoleId],
    ) -> Result<(), RepositoryError> {
        let body = AssignRolesRequest {
            role_ids: role_ids.iter().map(|id| id.to_string()).collect(),
        };
        if let Err(e) = self
            .api
            .post_ack(&[USERS, user_id.as_str(), ROLES], &body)
            .await
        {
            log_fallback("users.assign_roles", &e);
        }
        self.local.assign_roles(user_id, role_ids).await
    }

    async fn user_roles(&self, user_id: &UserId) -> Result<Vec<RoleId>, RepositoryError> {
        match self.remote_user_roles(user_id).await {
            Ok(role_ids) => {
                self.local.assign_roles(user_id, &role_ids).await?;
                return Ok(role_ids);
            }
            Err(e) => log_fallback("users.user_roles", &e),
        }
        self.local.user_roles(user_id).await
    }
}
