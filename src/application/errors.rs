//! Failure half of every use-case result.
//!
//! Each variant carries the localized message shown to the operator. The
//! variant only classifies the failure; `Display` is the message itself.

use thiserror::Error;

use crate::domain::foundation::ValidationError;
use crate::ports::RepositoryError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UseCaseError {
    /// Input missing or malformed.
    #[error("{0}")]
    Validation(String),
    /// Referenced aggregate does not exist.
    #[error("{0}")]
    NotFound(String),
    /// Uniqueness rule violated.
    #[error("{0}")]
    Conflict(String),
    /// Credentials or session not accepted.
    #[error("{0}")]
    Unauthorized(String),
    /// Lower layer failed; the message is the use case's generic one.
    #[error("{0}")]
    Failed(String),
}

impl UseCaseError {
    pub fn validation(message: impl Into<String>) -> Self {
        UseCaseError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        UseCaseError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        UseCaseError::Conflict(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        UseCaseError::Unauthorized(message.into())
    }

    /// Logs the repository failure and replaces it with `message`.
    pub fn repository(message: &str, error: RepositoryError) -> Self {
        tracing::error!(error = %error, "{message}");
        UseCaseError::Failed(message.to_string())
    }

    /// The localized message.
    pub fn message(&self) -> &str {
        match self {
            UseCaseError::Validation(m)
            | UseCaseError::NotFound(m)
            | UseCaseError::Conflict(m)
            | UseCaseError::Unauthorized(m)
            | UseCaseError::Failed(m) => m,
        }
    }
}

impl From<ValidationError> for UseCaseError {
    fn from(err: ValidationError) -> Self {
        UseCaseError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_message() {
        let err = UseCaseError::conflict("Ya existe un usuario con este email");
        assert_eq!(err.to_string(), "Ya existe un usuario con este email");
        assert_eq!(err.message(), "Ya existe un usuario con este email");
    }

    #[test]
    fn validation_errors_keep_their_localized_text() {
        let err: UseCaseError = ValidationError::empty_field("El email").into();
        assert_eq!(err, UseCaseError::Validation("El email no puede estar vacío".into()));
    }

    #[test]
    fn repository_failures_are_replaced_by_generic_message() {
        let err = UseCaseError::repository(
            "Error al crear usuario",
            RepositoryError::unavailable("disk full"),
        );
        assert_eq!(err, UseCaseError::Failed("Error al crear usuario".into()));
    }
}
