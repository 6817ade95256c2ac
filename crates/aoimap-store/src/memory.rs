//! In-memory key-value store for development and testing.
//!
//! Uses `RwLock::unwrap()` intentionally. Lock poisoning only occurs when
//! another thread panicked while holding the lock, which is an unrecoverable
//! state. For state that must survive restarts, use [`crate::FileStore`].

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use aoimap_core::ports::KeyValueStore;
use aoimap_core::Result;

/// In-memory implementation of `KeyValueStore`
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.write().unwrap().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
