//! Wire shapes of the admin API and their mapping into domain types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::auth::AuthSession;
use crate::domain::foundation::{Email, RoleId, Timestamp, UserId, ValidationError};
use crate::domain::role::Role;
use crate::domain::user::User;

/// A payload that decoded fine but does not form valid domain data.
#[derive(Debug, Clone, Error)]
pub enum PayloadError {
    #[error("invalid field: {0}")]
    Field(#[from] ValidationError),

    #[error("invalid timestamp '{value}': {reason}")]
    Timestamp { value: String, reason: String },
}

fn parse_timestamp(value: &str) -> Result<Timestamp, PayloadError> {
    Timestamp::parse_rfc3339(value).map_err(|e| PayloadError::Timestamp {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Auth
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest<'a> {
    pub user_id: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub is_active: bool,
}

/// Body of login, refresh and current-session responses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: SessionUser,
    pub token: String,
    pub refresh_token: String,
    pub expires_at: String,
}

impl LoginResponse {
    pub fn into_session(self) -> Result<AuthSession, PayloadError> {
        Ok(AuthSession::new(
            UserId::new(&self.user.id)?,
            Email::new(&self.user.email)?,
            self.token,
            self.refresh_token,
            parse_timestamp(&self.expires_at)?,
        ))
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Users
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
pub struct UserRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

impl<'a> From<&'a User> for UserRequest<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            name: user.name(),
            email: user.email().as_str(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: String,
}

impl UserResponse {
    pub fn into_user(self) -> Result<User, PayloadError> {
        Ok(User::reconstitute(
            UserId::new(&self.id)?,
            self.name,
            Email::new(&self.email)?,
            self.is_active,
            parse_timestamp(&self.created_at)?,
            Timestamp::now(),
        ))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRolesRequest {
    pub role_ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRolesResponse {
    pub role_ids: Vec<String>,
}

impl UserRolesResponse {
    pub fn into_role_ids(self) -> Result<Vec<RoleId>, PayloadError> {
        self.role_ids
            .iter()
            .map(|id| RoleId::new(id).map_err(PayloadError::from))
            .collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Roles
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
pub struct RoleRequest<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub permissions: &'a [String],
}

impl<'a> From<&'a Role> for RoleRequest<'a> {
    fn from(role: &'a Role) -> Self {
        Self {
            name: role.name(),
            description: role.description(),
            permissions: role.permissions(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub permissions: Vec<String>,
    pub is_active: bool,
    pub created_at: String,
}

impl RoleResponse {
    pub fn into_role(self) -> Result<Role, PayloadError> {
        Ok(Role::reconstitute(
            RoleId::new(&self.id)?,
            self.name,
            self.description,
            self.permissions,
            self.is_active,
            parse_timestamp(&self.created_at)?,
            Timestamp::now(),
        ))
    }
}
