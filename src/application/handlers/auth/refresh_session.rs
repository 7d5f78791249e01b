//! RefreshSessionHandler - Command handler for rotating session tokens.

use std::sync::Arc;

use crate::application::UseCaseError;
use crate::domain::auth::AuthSession;
use crate::ports::AuthRepository;

const NO_ACTIVE_SESSION: &str = "No hay sesión activa";
const REFRESH_FAILED: &str = "Error al refrescar la sesión";

#[derive(Debug, Clone)]
pub struct RefreshSessionCommand {
    pub refresh_token: String,
}

/// Outcome of a refresh. `session` is `None` when the backend declined to
/// issue a new one.
#[derive(Debug, Clone)]
pub struct RefreshSessionResult {
    pub session: Option<AuthSession>,
}

pub struct RefreshSessionHandler {
    repository: Arc<dyn AuthRepository>,
}

impl RefreshSessionHandler {
    pub fn new(repository: Arc<dyn AuthRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: RefreshSessionCommand,
    ) -> Result<RefreshSessionResult, UseCaseError> {
        if cmd.refresh_token.trim().is_empty() {
            return Err(UseCaseError::unauthorized(NO_ACTIVE_SESSION));
        }

        let session = self
            .repository
            .refresh_token(&cmd.refresh_token)
            .await
            .map_err(|e| UseCaseError::repository(REFRESH_FAILED, e))?;

        Ok(RefreshSessionResult { session })
    }
}
