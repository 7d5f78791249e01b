//! CreateUserHandler - Command handler for registering a new user account.

use std::sync::Arc;

use crate::application::UseCaseError;
use crate::domain::foundation::{Email, UserId};
use crate::domain::user::User;
use crate::ports::UserRepository;

const MISSING_FIELDS: &str = "Nombre y email son requeridos";
const DUPLICATE_EMAIL: &str = "Ya existe un usuario con este email";
const CREATE_FAILED: &str = "Error al crear usuario";

/// Command to create a user.
#[derive(Debug, Clone)]
pub struct CreateUserCommand {
    pub name: String,
    pub email: String,
}

/// Result of successful user creation.
#[derive(Debug, Clone)]
pub struct CreateUserResult {
    pub user: User,
}

/// Handler for creating users.
///
/// Emails are unique across accounts; the check runs before the aggregate is
/// built so a duplicate never reaches `save`.
pub struct CreateUserHandler {
    repository: Arc<dyn UserRepository>,
}

impl CreateUserHandler {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: CreateUserCommand) -> Result<CreateUserResult, UseCaseError> {
        // 1. Required fields
        if cmd.name.trim().is_empty() || cmd.email.trim().is_empty() {
            return Err(UseCaseError::validation(MISSING_FIELDS));
        }

        // 2. Value objects
        let email = Email::new(&cmd.email)?;

        // 3. Uniqueness
        let taken = self
            .repository
            .exists_by_email(&email)
            .await
            .map_err(|e| UseCaseError::repository(CREATE_FAILED, e))?;
        if taken {
            return Err(UseCaseError::conflict(DUPLICATE_EMAIL));
        }

        // 4. Create and persist
        let user = User::new(UserId::generate(), &cmd.name, email)?;
        let user = self
            .repository
            .save(&user)
            .await
            .map_err(|e| UseCaseError::repository(CREATE_FAILED, e))?;

        tracing::info!(user_id = %user.id(), "User created");
        Ok(CreateUserResult { user })
    }
}
