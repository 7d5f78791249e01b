//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - Admin API client and remote repositories with local fallback
//! - `memory` - Fixture-seeded in-memory repositories
//! - `storage` - Durable key-value stores and the token store
//! - `runtime` - Clocks, schedulers and host environments

pub mod http;
pub mod memory;
pub mod runtime;
pub mod storage;

pub use http::{ApiClient, ApiClientConfig, HttpAuthRepository, HttpRoleRepository, HttpUserRepository};
pub use memory::{InMemoryAuthRepository, InMemoryRoleRepository, InMemoryUserRepository};
pub use runtime::{HeadlessHost, ManualClock, RecordingHost, SystemClock, TokioScheduler};
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore, TokenStore};
