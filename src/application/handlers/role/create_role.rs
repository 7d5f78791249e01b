//! CreateRoleHandler - Command handler for defining a new role.

use std::sync::Arc;

use crate::application::UseCaseError;
use crate::domain::foundation::RoleId;
use crate::domain::role::Role;
use crate::ports::RoleRepository;

const MISSING_FIELDS: &str = "Nombre y descripción son requeridos";
const DUPLICATE_NAME: &str = "Ya existe un rol con este nombre";
const CREATE_FAILED: &str = "Error al crear rol";

/// Command to create a role.
#[derive(Debug, Clone, Default)]
pub struct CreateRoleCommand {
    pub name: String,
    pub description: String,
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CreateRoleResult {
    pub role: Role,
}

pub struct CreateRoleHandler {
    repository: Arc<dyn RoleRepository>,
}

impl CreateRoleHandler {
    pub fn new(repository: Arc<dyn RoleRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: CreateRoleCommand) -> Result<CreateRoleResult, UseCaseError> {
        if cmd.name.trim().is_empty() || cmd.description.trim().is_empty() {
            return Err(UseCaseError::validation(MISSING_FIELDS));
        }

        let taken = self
            .repository
            .exists_by_name(cmd.name.trim())
            .await
            .map_err(|e| UseCaseError::repository(CREATE_FAILED, e))?;
        if taken {
            return Err(UseCaseError::conflict(DUPLICATE_NAME));
        }

        let role = Role::new(
            RoleId::generate(),
            &cmd.name,
            &cmd.description,
            cmd.permissions,
        )?;
        let role = self
            .repository
            .save(&role)
            .await
            .map_err(|e| UseCaseError::repository(CREATE_FAILED, e))?;

        tracing::info!(role_id = %role.id(), name = role.name(), "Role created");
        Ok(CreateRoleResult { role })
    }
}
