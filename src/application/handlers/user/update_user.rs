//! UpdateUserHandler - Command handler for editing name and email.

use std::sync::Arc;

use crate::application::UseCaseError;
use crate::domain::foundation::{Email, UserId};
use crate::domain::user::User;
use crate::ports::UserRepository;

const NOT_FOUND: &str = "Usuario no encontrado";
const EMAIL_IN_USE: &str = "El email ya está en uso por otro usuario";
const UPDATE_FAILED: &str = "Error al actualizar usuario";

/// Command to update a user. Absent fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserCommand {
    pub user_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateUserResult {
    pub user: User,
}

pub struct UpdateUserHandler {
    repository: Arc<dyn UserRepository>,
}

impl UpdateUserHandler {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: UpdateUserCommand) -> Result<UpdateUserResult, UseCaseError> {
        let user_id = UserId::new(&cmd.user_id)?;

        let mut user = self
            .repository
            .find_by_id(&user_id)
            .await
            .map_err(|e| UseCaseError::repository(UPDATE_FAILED, e))?
            .ok_or_else(|| UseCaseError::not_found(NOT_FOUND))?;

        if let Some(name) = cmd.name.as_deref() {
            user.update_name(name)?;
        }

        if let Some(raw) = cmd.email.as_deref() {
            let email = Email::new(raw)?;
            if &email != user.email() {
                let owner = self
                    .repository
                    .find_by_email(&email)
                    .await
                    .map_err(|e| UseCaseError::repository(UPDATE_FAILED, e))?;
                if owner.is_some_and(|other| other.id() != user.id()) {
                    return Err(UseCaseError::conflict(EMAIL_IN_USE));
                }
                user.update_email(email);
            }
        }

        let user = self
            .repository
            .save(&user)
            .await
            .map_err(|e| UseCaseError::repository(UPDATE_FAILED, e))?;

        tracing::info!(user_id = %user.id(), "User updated");
        Ok(UpdateUserResult { user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::ScriptedUserRepository;

    fn handler(repo: &Arc<ScriptedUserRepository>) -> UpdateUserHandler {
        UpdateUserHandler::new(repo.clone())
    }

    #[tokio::test]
    async fn renames_user() {
        let repo = Arc::new(ScriptedUserRepository::with_fixtures());

        let result = handler(&repo)
            .handle(UpdateUserCommand {
                user_id: "1".into(),
                name: Some("Juan P. Pérez".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(result.user.name(), "Juan P. Pérez");
        assert_eq!(result.user.email().as_str(), "juan@example.com");
        assert_eq!(repo.save_count(), 1);
    }

    #[tokio::test]
    async fn changes_email_to_free_address() {
        let repo = Arc::new(ScriptedUserRepository::with_fixtures());

        let result = handler(&repo)
            .handle(UpdateUserCommand {
                user_id: "1".into(),
                email: Some("jperez@example.com".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(result.user.email().as_str(), "jperez@example.com");
    }

    #[tokio::test]
    async fn keeping_own_email_is_not_a_conflict() {
        let repo = Arc::new(ScriptedUserRepository::with_fixtures());

        let result = handler(&repo)
            .handle(UpdateUserCommand {
                user_id: "1".into(),
                email: Some("JUAN@example.com".into()),
                ..Default::default()
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn email_of_another_user_is_rejected() {
        let repo = Arc::new(ScriptedUserRepository::with_fixtures());

        let err = handler(&repo)
            .handle(UpdateUserCommand {
                user_id: "1".into(),
                email: Some("maria@example.com".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert_eq!(err, UseCaseError::Conflict(EMAIL_IN_USE.into()));
        assert_eq!(repo.save_count(), 0);
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let repo = Arc::new(ScriptedUserRepository::with_fixtures());

        let err = handler(&repo)
            .handle(UpdateUserCommand {
                user_id: "99".into(),
                name: Some("Nadie".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert_eq!(err, UseCaseError::NotFound(NOT_FOUND.into()));
    }

    #[tokio::test]
    async fn blank_name_is_rejected_before_saving() {
        let repo = Arc::new(ScriptedUserRepository::with_fixtures());

        let err = handler(&repo)
            .handle(UpdateUserCommand {
                user_id: "1".into(),
                name: Some("   ".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, UseCaseError::Validation(_)));
        assert_eq!(repo.save_count(), 0);
    }

    #[tokio::test]
    async fn read_failure_uses_generic_message() {
        let repo = Arc::new(ScriptedUserRepository::with_fixtures().failing_reads());

        let err = handler(&repo)
            .handle(UpdateUserCommand {
                user_id: "1".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert_eq!(err, UseCaseError::Failed(UPDATE_FAILED.into()));
    }
}
