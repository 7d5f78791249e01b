//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `user` - Administrable user accounts
//! - `role` - Roles and their permission sets
//! - `auth` - Authenticated sessions
//! - `preferences` - Client display preferences (theme)

pub mod auth;
pub mod foundation;
pub mod preferences;
pub mod role;
pub mod user;
