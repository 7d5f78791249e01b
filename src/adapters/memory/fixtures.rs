//! Seed data for the in-memory collections.
//!
//! These back the offline fallback of the HTTP repositories, so a console
//! without a reachable backend still has users, roles and accounts to
//! work with.

use crate::domain::foundation::{Email, RoleId, UserId};
use crate::domain::role::Role;
use crate::domain::user::User;

const USERS: [(&str, &str, &str); 3] = [
    ("1", "Juan Pérez", "juan@example.com"),
    ("2", "María García", "maria@example.com"),
    ("3", "Carlos López", "carlos@example.com"),
];

const ROLES: [(&str, &str, &str, &[&str]); 3] = [
    (
        "1",
        "Administrador",
        "Acceso completo al sistema",
        &[
            "create_user",
            "edit_user",
            "delete_user",
            "create_role",
            "edit_role",
            "delete_role",
        ],
    ),
    (
        "2",
        "Editor",
        "Puede crear y editar contenido",
        &["create_user", "edit_user"],
    ),
    (
        "3",
        "Visualizador",
        "Solo puede ver contenido",
        &["view_user"],
    ),
];

const CREDENTIALS: [(&str, &str, &str); 3] = [
    ("1", "admin@example.com", "admin123"),
    ("2", "user@example.com", "user123"),
    ("3", "test@example.com", "test123"),
];

/// Account the offline auth fallback accepts.
#[derive(Debug, Clone)]
pub struct FixtureCredential {
    pub user_id: UserId,
    pub email: Email,
    pub password: &'static str,
}

pub fn users() -> Vec<User> {
    USERS
        .iter()
        .filter_map(|(id, name, email)| {
            User::new(UserId::new(id).ok()?, name, Email::new(email).ok()?).ok()
        })
        .collect()
}

pub fn roles() -> Vec<Role> {
    ROLES
        .iter()
        .filter_map(|(id, name, description, permissions)| {
            Role::new(
                RoleId::new(id).ok()?,
                name,
                description,
                permissions.iter().map(|p| p.to_string()),
            )
            .ok()
        })
        .collect()
}

pub fn credentials() -> Vec<FixtureCredential> {
    CREDENTIALS
        .iter()
        .filter_map(|(id, email, password)| {
            Some(FixtureCredential {
                user_id: UserId::new(id).ok()?,
                email: Email::new(email).ok()?,
                password: *password,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_fixture_user_is_valid() {
        let users = users();
        assert_eq!(users.len(), USERS.len());
        assert_eq!(users[0].name(), "Juan Pérez");
        assert_eq!(users[2].email().as_str(), "carlos@example.com");
    }

    #[test]
    fn every_fixture_role_is_valid() {
        let roles = roles();
        assert_eq!(roles.len(), ROLES.len());
        assert_eq!(roles[0].permissions().len(), 6);
        assert!(roles[1].has_permission("edit_user"));
        assert_eq!(roles[2].permissions(), ["view_user".to_string()]);
    }

    #[test]
    fn every_credential_is_valid() {
        let credentials = credentials();
        assert_eq!(credentials.len(), CREDENTIALS.len());
        assert_eq!(credentials[0].email.as_str(), "admin@example.com");
        assert_eq!(credentials[0].password, "admin123");
    }
}
