//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `UserRepository`, `RoleRepository`, `AuthRepository` - aggregate persistence
//! - `KeyValueStore` - durable client storage for session and preferences
//!
//! ## Environment Ports
//!
//! - `Clock`, `Scheduler` - time source and deferred tasks
//! - `HostEnvironment` - scroll lock, theme application, OS color scheme

mod auth_repository;
mod errors;
mod host_environment;
mod key_value_store;
mod role_repository;
mod scheduler;
mod user_repository;

pub use auth_repository::AuthRepository;
pub use errors::{RepositoryError, StorageError};
pub use host_environment::{theme_color, HostEnvironment};
pub use key_value_store::KeyValueStore;
pub use role_repository::RoleRepository;
pub use scheduler::{Clock, Scheduler, Task, TaskHandle};
pub use user_repository::UserRepository;
