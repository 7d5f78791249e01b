//! In-Memory Key-Value Store Adapter
//!
//! Volatile storage for tests and for runs without a configured storage
//! file. Clones share the same underlying map.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::ports::{KeyValueStore, StorageError};

/// In-memory key-value storage
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing entries.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Arc::new(RwLock::new(map)),
        }
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_returns_value() {
        let store = InMemoryKeyValueStore::new();
        store.set("preferred-theme", "dark").unwrap();

        assert_eq!(store.get("preferred-theme").as_deref(), Some("dark"));
    }

    #[test]
    fn set_overwrites_existing_value() {
        let store = InMemoryKeyValueStore::new();
        store.set("k", "one").unwrap();
        store.set("k", "two").unwrap();

        assert_eq!(store.get("k").as_deref(), Some("two"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_deletes_key_and_tolerates_missing() {
        let store = InMemoryKeyValueStore::with_entries([("k", "v")]);
        store.remove("k").unwrap();
        store.remove("never-set").unwrap();

        assert!(store.get("k").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn clones_share_entries() {
        let store = InMemoryKeyValueStore::new();
        let clone = store.clone();
        clone.set("shared", "yes").unwrap();

        assert!(store.contains_key("shared"));
    }
}
