//! Durable client storage configuration

use serde::Deserialize;
use std::path::PathBuf;

/// Durable client storage configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// JSON file backing the key-value store; in-memory when absent
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    pub fn is_persistent(&self) -> bool {
        self.path.is_some()
    }
}
