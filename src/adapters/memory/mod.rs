//! In-memory repositories seeded with fixture data.
//!
//! Used as the offline fallback of the HTTP repositories and directly by
//! tests.

pub mod fixtures;
mod auth_repository;
mod role_repository;
mod user_repository;

pub use auth_repository::{InMemoryAuthRepository, DEFAULT_SESSION_TTL_MS};
pub use fixtures::FixtureCredential;
pub use role_repository::InMemoryRoleRepository;
pub use user_repository::InMemoryUserRepository;
