//! DeleteUserHandler - Command handler for removing a user account.

use std::sync::Arc;

use crate::application::UseCaseError;
use crate::domain::foundation::UserId;
use crate::ports::UserRepository;

const DELETE_FAILED: &str = "Error al eliminar usuario";

#[derive(Debug, Clone)]
pub struct DeleteUserCommand {
    pub user_id: String,
}

/// Deletes a user. Unknown ids succeed, matching the repository contract.
pub struct DeleteUserHandler {
    repository: Arc<dyn UserRepository>,
}

impl DeleteUserHandler {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteUserCommand) -> Result<(), UseCaseError> {
        let user_id = UserId::new(&cmd.user_id)?;

        self.repository
            .delete(&user_id)
            .await
            .map_err(|e| UseCaseError::repository(DELETE_FAILED, e))?;

        tracing::info!(user_id = %user_id, "User deleted");
        Ok(())
    }
}
