//! Auth module - issued sessions and their persisted shape.

mod session;

pub use session::{AuthSession, SessionRecord, SessionRecordError};
