//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types that form the
//! vocabulary of the admin console domain.

mod email;
mod errors;
mod ids;
mod timestamp;

pub use email::Email;
pub use errors::ValidationError;
pub use ids::{RoleId, UserId};
pub use timestamp::Timestamp;
