//! User aggregate entity.

use crate::domain::foundation::{Email, Timestamp, UserId, ValidationError};
use serde::{Deserialize, Serialize};

/// Administrable user account.
///
/// # Invariants
///
/// - `id` and `created_at` never change
/// - `name` is non-empty after trimming
/// - every mutator bumps `updated_at`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    email: Email,
    is_active: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl User {
    /// Create a new active user.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if name is blank
    pub fn new(id: UserId, name: impl AsRef<str>, email: Email) -> Result<Self, ValidationError> {
        let name = Self::validate_name(name.as_ref())?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            name,
            email,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a user from persistence (no validation).
    pub fn reconstitute(
        id: UserId,
        name: String,
        email: Email,
        is_active: bool,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            email,
            is_active,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
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

    /// Rename the user.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if name is blank; the user is left unchanged
    pub fn update_name(&mut self, name: &str) -> Result<(), ValidationError> {
        self.name = Self::validate_name(name)?;
        self.touch();
        Ok(())
    }

    /// Replace the email address.
    pub fn update_email(&mut self, email: Email) {
        self.email = email;
        self.touch();
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
            return Err(ValidationError::empty_field("El nombre"));
        }
        Ok(trimmed.to_string())
    }
}
