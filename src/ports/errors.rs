//! Error types shared by the persistence ports.

use thiserror::Error;

/// Failures a repository may surface to its caller.
///
/// Remote adapters absorb transport problems into their local fallback, so
/// in practice these come from test doubles or from data that cannot be
/// mapped back into domain types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Repository unavailable: {0}")]
    Unavailable(String),

    #[error("Corrupt record: {0}")]
    CorruptRecord(String),
}

impl RepositoryError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::CorruptRecord(message.into())
    }
}

/// Failures of the durable client key-value storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize storage: {0}")]
    Serialization(#[from] serde_json::Error),
}
