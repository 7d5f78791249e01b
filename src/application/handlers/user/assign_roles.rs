//! AssignRolesHandler - Command handler for replacing a user's roles.
//!
//! Every requested role is verified before the single bulk assignment, so an
//! unknown id leaves the current assignment untouched.

use std::sync::Arc;

use crate::application::UseCaseError;
use crate::domain::foundation::{RoleId, UserId};
use crate::ports::{RoleRepository, UserRepository};

const USER_NOT_FOUND: &str = "Usuario no encontrado";
const NO_ROLES: &str = "Debe seleccionar al menos un rol";
const ASSIGN_FAILED: &str = "Error al asignar roles al usuario";

#[derive(Debug, Clone)]
pub struct AssignRolesCommand {
    pub user_id: String,
    pub role_ids: Vec<String>,
}

pub struct AssignRolesHandler {
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
}

impl AssignRolesHandler {
    pub fn new(users: Arc<dyn UserRepository>, roles: Arc<dyn RoleRepository>) -> Self {
        Self { users, roles }
    }

    pub async fn handle(&self, cmd: AssignRolesCommand) -> Result<(), UseCaseError> {
        let user_id = UserId::new(&cmd.user_id)?;

        // 1. User must exist
        let user = self
            .users
            .find_by_id(&user_id)
            .await
            .map_err(|e| UseCaseError::repository(ASSIGN_FAILED, e))?;
        if user.is_none() {
            return Err(UseCaseError::not_found(USER_NOT_FOUND));
        }

        // 2. At least one role
        if cmd.role_ids.is_empty() {
            return Err(UseCaseError::validation(NO_ROLES));
        }

        // 3. Every role must exist, checked in request order
        let mut role_ids = Vec::with_capacity(cmd.role_ids.len());
        for raw in &cmd.role_ids {
            let role_id = RoleId::new(raw)?;
            let role = self
                .roles
                .find_by_id(&role_id)
                .await
                .map_err(|e| UseCaseError::repository(ASSIGN_FAILED, e))?;
            if role.is_none() {
                return Err(UseCaseError::not_found(format!(
                    "El rol con ID {raw} no existe"
                )));
            }
            role_ids.push(role_id);
        }

        // 4. Bulk assignment
        self.users
            .assign_roles(&user_id, &role_ids)
            .await
            .map_err(|e| UseCaseError::repository(ASSIGN_FAILED, e))?;

        tracing::info!(user_id = %user_id, roles = role_ids.len(), "Roles assigned");
        Ok(())
    }
}
