//! LoginHandler - Command handler for exchanging credentials for a session.

use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

use crate::application::UseCaseError;
use crate::domain::auth::AuthSession;
use crate::domain::foundation::Email;
use crate::ports::AuthRepository;

const MISSING_CREDENTIALS: &str = "Email y contraseña son requeridos";
const INVALID_CREDENTIALS: &str = "Credenciales inválidas";
const UNKNOWN_ERROR: &str = "Error desconocido";

/// Command to log in.
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: SecretString,
}

impl LoginCommand {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::new(password.into()),
        }
    }
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub session: AuthSession,
}

/// Handler for logging in.
pub struct LoginHandler {
    repository: Arc<dyn AuthRepository>,
}

impl LoginHandler {
    pub fn new(repository: Arc<dyn AuthRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: LoginCommand) -> Result<LoginResult, UseCaseError> {
        // 1. Required fields
        if cmd.email.is_empty() || cmd.password.expose_secret().is_empty() {
            return Err(UseCaseError::validation(MISSING_CREDENTIALS));
        }

        // 2. Value objects
        let email = Email::new(&cmd.email)?;

        // 3. Authenticate
        let session = self
            .repository
            .authenticate(&email, &cmd.password)
            .await
            .map_err(|e| UseCaseError::repository(UNKNOWN_ERROR, e))?
            .ok_or_else(|| UseCaseError::unauthorized(INVALID_CREDENTIALS))?;

        tracing::info!(user_id = %session.user_id(), "User logged in");
        Ok(LoginResult { session })
    }
}
