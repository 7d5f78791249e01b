//! Storage Adapters
//!
//! Implementations of the KeyValueStore port, plus the token store built
//! on top of it.
//!
//! ## Available Adapters
//!
//! - **FileKeyValueStore** - Stores entries in a JSON file on disk
//! - **InMemoryKeyValueStore** - Stores entries in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileKeyValueStore, InMemoryKeyValueStore};
//!
//! // Production: file-based storage
//! let storage = FileKeyValueStore::open("./data/client-storage.json")?;
//!
//! // Testing: in-memory storage
//! let storage = InMemoryKeyValueStore::new();
//! ```

mod file_key_value_store;
mod in_memory_key_value_store;
mod token_store;

pub use file_key_value_store::FileKeyValueStore;
pub use in_memory_key_value_store::InMemoryKeyValueStore;
pub use token_store::{
    TokenSet, TokenStore, ACCESS_TOKEN_KEY, DEFAULT_REFRESH_WINDOW_MS, EXPIRES_AT_KEY,
    REFRESH_TOKEN_KEY,
};
