//! Application layer - use cases, global state and their orchestration.
//!
//! Handlers run one use case against the repository ports. The global state
//! holds what the front end renders, and `AuthService` connects the two for
//! login, logout and session refresh.

mod auth_service;
mod context;
mod errors;
pub mod handlers;
pub mod state;

pub use auth_service::AuthService;
pub use context::{AppContext, ContextError};
pub use errors::UseCaseError;
pub use state::GlobalState;
