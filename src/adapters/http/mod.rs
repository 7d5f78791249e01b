//! HTTP adapters - admin API client and remote repositories.
//!
//! Each repository tries the admin API first, bounded by the client
//! timeout. Any failure (timeout, network, non-success status, rejected
//! envelope, malformed payload) is logged and the call is served from the
//! repository's in-memory collection instead. Successful remote results are
//! written into that collection as well.

mod auth_repository;
mod client;
pub mod dto;
mod envelope;
mod role_repository;
mod user_repository;

pub use auth_repository::HttpAuthRepository;
pub use client::{ApiClient, ApiClientConfig, TransportError};
pub use envelope::ApiResponse;
pub use role_repository::HttpRoleRepository;
pub use user_repository::HttpUserRepository;

fn log_fallback(operation: &'static str, error: &TransportError) {
    tracing::warn!(operation, error = %error, "Admin API call failed, using local fallback");
}
