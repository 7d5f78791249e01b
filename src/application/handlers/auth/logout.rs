//! LogoutHandler - Command handler for revoking a user's sessions.

use std::sync::Arc;

use crate::application::UseCaseError;
use crate::domain::foundation::UserId;
use crate::ports::AuthRepository;

const LOGOUT_FAILED: &str = "Error al cerrar sesión";

/// Command to log a user out.
#[derive(Debug, Clone)]
pub struct LogoutCommand {
    pub user_id: String,
}

pub struct LogoutHandler {
    repository: Arc<dyn AuthRepository>,
}

impl LogoutHandler {
    pub fn new(repository: Arc<dyn AuthRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: LogoutCommand) -> Result<(), UseCaseError> {
        let user_id = UserId::new(&cmd.user_id)?;

        self.repository
            .logout(&user_id)
            .await
            .map_err(|e| UseCaseError::repository(LOGOUT_FAILED, e))?;

        tracing::info!(user_id = %user_id, "User logged out");
        Ok(())
    }
}
