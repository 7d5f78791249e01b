//! Read-side user handlers: list, lookup and role assignments.

use std::sync::Arc;

use crate::application::UseCaseError;
use crate::domain::foundation::{RoleId, UserId};
use crate::domain::user::User;
use crate::ports::UserRepository;

const NOT_FOUND: &str = "Usuario no encontrado";
const LIST_FAILED: &str = "Error al obtener usuarios";
const LOOKUP_FAILED: &str = "Error al buscar usuario";
const ROLES_FAILED: &str = "Error al obtener roles del usuario";

pub struct GetAllUsersHandler {
    repository: Arc<dyn UserRepository>,
}

impl GetAllUsersHandler {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self) -> Result<Vec<User>, UseCaseError> {
        self.repository
            .find_all()
            .await
            .map_err(|e| UseCaseError::repository(LIST_FAILED, e))
    }
}

#[derive(Debug, Clone)]
pub struct GetUserQuery {
    pub user_id: String,
}

pub struct GetUserHandler {
    repository: Arc<dyn UserRepository>,
}

impl GetUserHandler {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetUserQuery) -> Result<User, UseCaseError> {
        let user_id = UserId::new(&query.user_id)?;

        self.repository
            .find_by_id(&user_id)
            .await
            .map_err(|e| UseCaseError::repository(LOOKUP_FAILED, e))?
            .ok_or_else(|| UseCaseError::not_found(NOT_FOUND))
    }
}

#[derive(Debug, Clone)]
pub struct GetUserRolesQuery {
    pub user_id: String,
}

/// Returns the ids of the roles currently assigned to a user.
pub struct GetUserRolesHandler {
    repository: Arc<dyn UserRepository>,
}

impl GetUserRolesHandler {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetUserRolesQuery) -> Result<Vec<RoleId>, UseCaseError> {
        let user_id = UserId::new(&query.user_id)?;

        self.repository
            .user_roles(&user_id)
            .await
            .map_err(|e| UseCaseError::repository(ROLES_FAILED, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::ScriptedUserRepository;

    #[tokio::test]
    async fn lists_fixture_users() {
        let repo = Arc::new(ScriptedUserRepository::with_fixtures());

        let users = GetAllUsersHandler::new(repo).handle().await.unwrap();

        let names: Vec<&str> = users.iter().map(|u| u.name()).collect();
        assert_eq!(names, vec!["Juan Pérez", "María García", "Carlos López"]);
    }

    #[tokio::test]
    async fn list_failure_uses_generic_message() {
        let repo = Arc::new(ScriptedUserRepository::with_fixtures().failing_reads());

        let err = GetAllUsersHandler::new(repo).handle().await.unwrap_err();

        assert_eq!(err, UseCaseError::Failed(LIST_FAILED.into()));
    }

    #[tokio::test]
    async fn finds_user_by_id() {
        let repo = Arc::new(ScriptedUserRepository::with_fixtures());

        let user = GetUserHandler::new(repo)
            .handle(GetUserQuery {
                user_id: "2".into(),
            })
            .await
            .unwrap();

        assert_eq!(user.email().as_str(), "maria@example.com");
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let repo = Arc::new(ScriptedUserRepository::with_fixtures());

        let err = GetUserHandler::new(repo)
            .handle(GetUserQuery {
                user_id: "42".into(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, UseCaseError::NotFound(NOT_FOUND.into()));
    }

    #[tokio::test]
    async fn lookup_failure_uses_generic_message() {
        let repo = Arc::new(ScriptedUserRepository::with_fixtures().failing_reads());

        let err = GetUserHandler::new(repo)
            .handle(GetUserQuery {
                user_id: "1".into(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.message(), LOOKUP_FAILED);
    }

    #[tokio::test]
    async fn user_roles_reflect_assignment() {
        let repo = Arc::new(ScriptedUserRepository::with_fixtures());
        let user_id = UserId::new("1").unwrap();
        let roles = vec![RoleId::new("1").unwrap(), RoleId::new("3").unwrap()];
        repo.assign_roles(&user_id, &roles).await.unwrap();

        let assigned = GetUserRolesHandler::new(repo)
            .handle(GetUserRolesQuery {
                user_id: "1".into(),
            })
            .await
            .unwrap();

        assert_eq!(assigned, roles);
    }
}
