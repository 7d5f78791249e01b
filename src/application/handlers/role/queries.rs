//! Read-side role handlers and role deletion.

use std::sync::Arc;

use crate::application::UseCaseError;
use crate::domain::foundation::RoleId;
use crate::domain::role::Role;
use crate::ports::RoleRepository;

const NOT_FOUND: &str = "Rol no encontrado";
const LIST_FAILED: &str = "Error al obtener roles";
const LOOKUP_FAILED: &str = "Error al buscar rol";
const DELETE_FAILED: &str = "Error al eliminar rol";

pub struct GetAllRolesHandler {
    repository: Arc<dyn RoleRepository>,
}

impl GetAllRolesHandler {
    pub fn new(repository: Arc<dyn RoleRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self) -> Result<Vec<Role>, UseCaseError> {
        self.repository
            .find_all()
            .await
            .map_err(|e| UseCaseError::repository(LIST_FAILED, e))
    }
}

#[derive(Debug, Clone)]
pub struct GetRoleQuery {
    pub role_id: String,
}

pub struct GetRoleHandler {
    repository: Arc<dyn RoleRepository>,
}

impl GetRoleHandler {
    pub fn new(repository: Arc<dyn RoleRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetRoleQuery) -> Result<Role, UseCaseError> {
        let role_id = RoleId::new(&query.role_id)?;

        self.repository
            .find_by_id(&role_id)
            .await
            .map_err(|e| UseCaseError::repository(LOOKUP_FAILED, e))?
            .ok_or_else(|| UseCaseError::not_found(NOT_FOUND))
    }
}

#[derive(Debug, Clone)]
pub struct DeleteRoleCommand {
    pub role_id: String,
}

pub struct DeleteRoleHandler {
    repository: Arc<dyn RoleRepository>,
}

impl DeleteRoleHandler {
    pub fn new(repository: Arc<dyn RoleRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteRoleCommand) -> Result<(), UseCaseError> {
        let role_id = RoleId::new(&cmd.role_id)?;

        self.repository
            .delete(&role_id)
            .await
            .map_err(|e| UseCaseError::repository(DELETE_FAILED, e))?;

        tracing::info!(role_id = %role_id, "Role deleted");
        Ok(())
    }
}
