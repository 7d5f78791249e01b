//! Admin Console - session, state and user/role administration core.
//!
//! The crate keeps the client-side state of an administration console
//! (authentication, theme, UI and notifications), persists what must survive
//! a restart, and runs the user, role and auth use cases against a remote
//! admin API that falls back to local data when the API is unreachable.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
