//! In-memory store backed by a locked `HashMap`.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::{Payload, Store};

// == Memory Store ==
/// Keeps payloads as live values; nothing is serialized.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, Payload>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored entries, live or stale.
    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }
}

impl Store for MemoryStore {
    fn clear(&self) -> bool {
        self.values.write().clear();
        true
    }

    fn delete(&self, key: &str) -> bool {
        self.values.write().remove(key);
        true
    }

    fn get(&self, key: &str) -> Option<Payload> {
        self.values.read().get(key).cloned()
    }

    fn has(&self, key: &str) -> bool {
        self.values.read().contains_key(key)
    }

    fn set(&self, key: &str, payload: Payload) -> bool {
        self.values.write().insert(key.to_string(), payload);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::check_store_contract;
    use serde_json::json;

    #[test]
    fn test_memory_store_contract() {
        check_store_contract(&MemoryStore::new());
    }

    #[test]
    fn test_len_tracks_entries() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        store.set("key1", json!(1));
        store.set("key2", json!(2));
        store.set("key1", json!(3));
        assert_eq!(store.len(), 2);

        store.delete("key1");
        assert_eq!(store.len(), 1);
    }
}
