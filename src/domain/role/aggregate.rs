//! Role aggregate entity.

use crate::domain::foundation::{RoleId, Timestamp, ValidationError};
use serde::{Deserialize, Serialize};

/// Named bundle of permission tokens assignable to users.
///
/// # Invariants
///
/// - `name` is non-empty after trimming
/// - `permissions` has no duplicates and keeps insertion order
/// - only effective mutations bump `updated_at`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    id: RoleId,
    name: String,
    description: String,
    permissions: Vec<String>,
    is_active: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Role {
    /// Create a new active role.
    ///
    /// Duplicate permissions in the input are collapsed to their first
    /// occurrence.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if name is blank
    pub fn new(
        id: RoleId,
        name: impl AsRef<str>,
        description: impl AsRef<str>,
        permissions: impl IntoIterator<Item = String>,
    ) -> Result<Self, ValidationError> {
        let name = Self::validate_name(name.as_ref())?;

        let now = Timestamp::now();
        let mut role = Self {
            id,
            name,
            description: description.as_ref().trim().to_string(),
            permissions: Vec::new(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        for permission in permissions {
            if !role.has_permission(&permission) {
                role.permissions.push(permission);
            }
        }
        Ok(role)
    }

    /// Reconstitute a role from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: RoleId,
        name: String,
        description: String,
        permissions: Vec<String>,
        is_active: bool,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            description,
            permissions,
            is_active,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &RoleId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the permissions in insertion order.
    ///
    /// The slice is read-only; changes go through `add_permission` and
    /// `remove_permission`.
    pub fn permissions(&self) -> &[String] {
        &self.permissions
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Rename the role.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if name is blank; the role is left unchanged
    pub fn update_name(&mut self, name: &str) -> Result<(), ValidationError> {
        self.name = Self::validate_name(name)?;
        self.touch();
        Ok(())
    }

    pub fn update_description(&mut self, description: &str) {
        self.description = description.trim().to_string();
        self.touch();
    }

    /// Adds a permission. Returns `false` if it was already present.
    pub fn add_permission(&mut self, permission: impl Into<String>) -> bool {
        let permission = permission.into();
        if self.has_permission(&permission) {
            return false;
        }
        self.permissions.push(permission);
        self.touch();
        true
    }

    /// Removes a permission. Returns `false` if it was absent.
    pub fn remove_permission(&mut self, permission: &str) -> bool {
        let Some(index) = self.permissions.iter().position(|p| p == permission) else {
            return false;
        };
        self.permissions.remove(index);
        self.touch();
        true
    }

    pub fn activate(&mut self) {
        self.is_active = true;
        self.touch();
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }

    fn validate_name(name: &str) -> Result<String, ValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("El nombre del rol"));
        }
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aged_role(permissions: &[&str]) -> Role {
        let past = Timestamp::now().minus_millis(60_000);
        Role::reconstitute(
            RoleId::new("role-1").unwrap(),
            "Editor".to_string(),
            "Puede editar".to_string(),
            permissions.iter().map(|p| p.to_string()).collect(),
            true,
            past,
            past,
        )
    }

    #[test]
    fn new_role_collapses_duplicate_permissions() {
        let role = Role::new(
            RoleId::new("r").unwrap(),
            "Admin",
            "Todo",
            vec!["read".to_string(), "write".to_string(), "read".to_string()],
        )
        .unwrap();
        assert_eq!(role.permissions(), ["read", "write"]);
    }

    #[test]
    fn new_role_rejects_blank_name() {
        let err = Role::new(RoleId::new("r").unwrap(), " ", "x", Vec::new()).unwrap_err();
        assert_eq!(err.to_string(), "El nombre del rol no puede estar vacío");
    }

    #[test]
    fn add_permission_is_idempotent() {
        let mut role = aged_role(&[]);

        assert!(role.add_permission("edit_user"));
        let after_first = *role.updated_at();
        assert!(!role.add_permission("edit_user"));

        assert_eq!(role.permissions(), ["edit_user"]);
        assert_eq!(role.updated_at(), &after_first);
    }

    #[test]
    fn remove_absent_permission_is_noop() {
        let mut role = aged_role(&["view_user"]);
        let before = *role.updated_at();

        assert!(!role.remove_permission("delete_user"));
        assert_eq!(role.updated_at(), &before);
        assert_eq!(role.permissions(), ["view_user"]);
    }

    #[test]
    fn remove_permission_preserves_order_of_the_rest() {
        let mut role = aged_role(&["a", "b", "c"]);
        let before = *role.updated_at();

        assert!(role.remove_permission("b"));
        assert_eq!(role.permissions(), ["a", "c"]);
        assert!(role.updated_at().is_after(&before));
    }

    #[test]
    fn update_name_rejects_blank_and_keeps_name() {
        let mut role = aged_role(&[]);
        assert!(role.update_name("").is_err());
        assert_eq!(role.name(), "Editor");

        role.update_name("  Supervisor ").unwrap();
        assert_eq!(role.name(), "Supervisor");
    }

    #[test]
    fn update_description_trims_and_bumps() {
        let mut role = aged_role(&[]);
        let before = *role.updated_at();
        role.update_description("  Nuevo texto ");
        assert_eq!(role.description(), "Nuevo texto");
        assert!(role.updated_at().is_after(&before));
    }

    #[test]
    fn deactivate_then_activate() {
        let mut role = aged_role(&[]);
        role.deactivate();
        assert!(!role.is_active());
        role.activate();
        assert!(role.is_active());
    }
}
