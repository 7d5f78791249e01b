//! Handlers that modify an existing role: details and permissions.

use std::sync::Arc;

use crate::application::UseCaseError;
use crate::domain::foundation::RoleId;
use crate::domain::role::Role;
use crate::ports::RoleRepository;

const NOT_FOUND: &str = "Rol no encontrado";
const UPDATE_FAILED: &str = "Error al actualizar rol";
const ASSIGN_PERMISSION_FAILED: &str = "Error al asignar permiso";
const REMOVE_PERMISSION_FAILED: &str = "Error al remover permiso";

/// Loads the role, applies `change` and saves it. Read and write failures
/// share `failure`.
async fn modify_role(
    repository: &dyn RoleRepository,
    raw_id: &str,
    failure: &str,
    change: impl FnOnce(&mut Role) -> Result<(), UseCaseError>,
) -> Result<Role, UseCaseError> {
    let role_id = RoleId::new(raw_id)?;

    let mut role = repository
        .find_by_id(&role_id)
        .await
        .map_err(|e| UseCaseError::repository(failure, e))?
        .ok_or_else(|| UseCaseError::not_found(NOT_FOUND))?;

    change(&mut role)?;

    repository
        .save(&role)
        .await
        .map_err(|e| UseCaseError::repository(failure, e))
}

// ─────────────────────────────────────────────────────────────────────────────
// Update details
// ─────────────────────────────────────────────────────────────────────────────

/// Command to update a role. Absent fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateRoleCommand {
    pub role_id: String,
    pub name: Option<String>,
    pub description: Option<String>,
}

pub struct UpdateRoleHandler {
    repository: Arc<dyn RoleRepository>,
}

impl UpdateRoleHandler {
    pub fn new(repository: Arc<dyn RoleRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: UpdateRoleCommand) -> Result<Role, UseCaseError> {
        let role = modify_role(self.repository.as_ref(), &cmd.role_id, UPDATE_FAILED, |role| {
            if let Some(name) = cmd.name.as_deref() {
                role.update_name(name)?;
            }
            if let Some(description) = cmd.description.as_deref() {
                role.update_description(description);
            }
            Ok(())
        })
        .await?;

        tracing::info!(role_id = %role.id(), "Role updated");
        Ok(role)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Permissions
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct RolePermissionCommand {
    pub role_id: String,
    pub permission: String,
}

/// Grants a permission. Granting one already held still succeeds.
pub struct AssignPermissionHandler {
    repository: Arc<dyn RoleRepository>,
}

impl AssignPermissionHandler {
    pub fn new(repository: Arc<dyn RoleRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: RolePermissionCommand) -> Result<Role, UseCaseError> {
        modify_role(
            self.repository.as_ref(),
            &cmd.role_id,
            ASSIGN_PERMISSION_FAILED,
            |role| {
                role.add_permission(cmd.permission);
                Ok(())
            },
        )
        .await
    }
}

/// Revokes a permission. Revoking one not held still succeeds.
pub struct RemovePermissionHandler {
    repository: Arc<dyn RoleRepository>,
}

impl RemovePermissionHandler {
    pub fn new(repository: Arc<dyn RoleRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: RolePermissionCommand) -> Result<Role, UseCaseError> {
        modify_role(
            self.repository.as_ref(),
            &cmd.role_id,
            REMOVE_PERMISSION_FAILED,
            |role| {
                role.remove_permission(&cmd.permission);
                Ok(())
            },
        )
        .await
    }
}
