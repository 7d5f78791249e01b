//! Durable client storage port.
//!
//! A flat string-to-string store with synchronous writes, the shape of a
//! browser's local storage. Reads never fail; a backend that cannot read
//! behaves as empty.

use super::StorageError;

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
