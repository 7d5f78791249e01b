//! Remote role repository with local fallback.

use async_trait::async_trait;
use std::sync::Arc;

use super::client::{ApiClient, TransportError};
use super::dto::{RoleRequest, RoleResponse};
use super::log_fallback;
use crate::adapters::memory::InMemoryRoleRepository;
use crate::domain::foundation::RoleId;
use crate::domain::role::Role;
use crate::ports::{RepositoryError, RoleRepository};

const ROLES: &str = "roles";
const CHECK_NAME: &str = "check-name";

#[derive(Debug)]
pub struct HttpRoleRepository {
    api: Arc<ApiClient>,
    local: InMemoryRoleRepository,
}

impl HttpRoleRepository {
    /// Fallback collection seeded with the fixture roles.
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self::with_local(api, InMemoryRoleRepository::with_fixtures())
    }

    pub fn with_local(api: Arc<ApiClient>, local: InMemoryRoleRepository) -> Self {
        Self { api, local }
    }

    pub fn local(&self) -> &InMemoryRoleRepository {
        &self.local
    }

    async fn remote_role(&self, segments: &[&str]) -> Result<Role, TransportError> {
        let dto: RoleResponse = self.api.get(segments).await?;
        Ok(dto.into_role()?)
    }

    async fn remote_roles(&self) -> Result<Vec<Role>, TransportError> {
        let dtos: Vec<RoleResponse> = self.api.get(&[ROLES]).await?;
        dtos.into_iter()
            .map(|dto| dto.into_role().map_err(TransportError::from))
            .collect()
    }
}

#[async_trait]
impl RoleRepository for HttpRoleRepository {
    async fn find_by_id(&self, id: &RoleId) -> Result<Option<Role>, RepositoryError> {
        match self.remote_role(&[ROLES, id.as_str()]).await {
            Ok(role) => {
                self.local.save(&role).await?;
                return Ok(Some(role));
            }
            Err(e) => log_fallback("roles.find_by_id", &e),
        }
        self.local.find_by_id(id).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, RepositoryError> {
        match self.remote_role(&[ROLES, CHECK_NAME, name]).await {
            Ok(role) => {
                self.local.save(&role).await?;
                return Ok(Some(role));
            }
            Err(e) => log_fallback("roles.find_by_name", &e),
        }
        self.local.find_by_name(name).await
    }

    async fn find_all(&self) -> Result<Vec<Role>, RepositoryError> {
        match self.remote_roles().await {
            Ok(roles) => {
                for role in &roles {
                    self.local.save(role).await?;
                }
                return Ok(roles);
            }
            Err(e) => log_fallback("roles.find_all", &e),
        }
        self.local.find_all().await
    }

    async fn save(&self, role: &Role) -> Result<Role, RepositoryError> {
        let is_update = self.local.find_by_id(role.id()).await?.is_some();
        let body = RoleRequest::from(role);

        let remote: Result<RoleResponse, TransportError> = if is_update {
            self.api.put(&[ROLES, role.id().as_str()], &body).await
        } else {
            self.api.post(&[ROLES], &body).await
        };

        match remote.and_then(|dto| Ok(dto.into_role()?)) {
            Ok(saved) => return self.local.save(&saved).await,
            Err(e) => log_fallback("roles.save", &e),
        }
        self.local.save(role).await
    }

    async fn delete(&self, id: &RoleId) -> Result<(), RepositoryError> {
        if let Err(e) = self.api.delete(&[ROLES, id.as_str()]).await {
            log_fallback("roles.delete", &e);
        }
        self.local.delete(id).await
    }
}
