//! Store Module
//!
//! Raw key to payload persistence behind a single capability trait.
//!
//! Stores know nothing about expiry or key grammar. They persist whatever
//! payload they are handed and report ordinary I/O failure as `false` or
//! absent, never as a panic or error.
//!
//! # Backends
//! - [`MemoryStore`]: process-local map, payloads kept as live values
//! - [`FileSystemStore`]: one file per key in a hashed two-level directory tree
//! - [`RedisStore`] / [`MemcacheStore`]: adapters over a remote connection

mod codec;
mod filesystem;
mod memcache;
mod memory;
mod redis;

use std::sync::Arc;

pub use codec::{decode, encode};
pub use filesystem::FileSystemStore;
pub use memcache::{MemcacheConnection, MemcacheStore};
pub use memory::MemoryStore;
pub use redis::{RedisConnection, RedisStore};

/// The opaque unit a store persists.
pub type Payload = serde_json::Value;

// == Connection Error ==
/// Failure reported by a remote connection.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Connection error: {0}")]
pub struct ConnectionError(pub String);

// == Store Trait ==
/// Key to payload persistence capability consumed by the cache facades.
pub trait Store: Send + Sync {
    /// Removes every entry. Returns false if the backend could not be emptied.
    fn clear(&self) -> bool;

    /// Removes `key`.
    ///
    /// Returns true when the key is absent afterwards, whether or not it
    /// existed; false only when the backend failed to remove it.
    fn delete(&self, key: &str) -> bool;

    /// Returns the payload for `key`, or None if absent or unreadable.
    fn get(&self, key: &str) -> Option<Payload>;

    /// Existence check only; the payload is not read or validated.
    fn has(&self, key: &str) -> bool;

    /// Persists `payload` under `key`, overwriting any previous payload.
    fn set(&self, key: &str, payload: Payload) -> bool;
}

impl<S: Store + ?Sized> Store for Box<S> {
    fn clear(&self) -> bool {
        (**self).clear()
    }

    fn delete(&self, key: &str) -> bool {
        (**self).delete(key)
    }

    fn get(&self, key: &str) -> Option<Payload> {
        (**self).get(key)
    }

    fn has(&self, key: &str) -> bool {
        (**self).has(key)
    }

    fn set(&self, key: &str, payload: Payload) -> bool {
        (**self).set(key, payload)
    }
}

impl<S: Store + ?Sized> Store for Arc<S> {
    fn clear(&self) -> bool {
        (**self).clear()
    }

    fn delete(&self, key: &str) -> bool {
        (**self).delete(key)
    }

    fn get(&self, key: &str) -> Option<Payload> {
        (**self).get(key)
    }

    fn has(&self, key: &str) -> bool {
        (**self).has(key)
    }

    fn set(&self, key: &str, payload: Payload) -> bool {
        (**self).set(key, payload)
    }
}

// == Shared Store Tests ==
/// Exercises the store contract every backend must honour.
#[cfg(test)]
pub(crate) fn check_store_contract<S: Store>(store: &S) {
    use serde_json::json;

    let key = "somekey";
    assert!(!store.has(key));
    assert!(store.get(key).is_none());

    assert!(store.set(key, json!({ "value": "somevalue", "expiry": null })));
    assert!(store.has(key));
    assert_eq!(
        store.get(key),
        Some(json!({ "value": "somevalue", "expiry": null }))
    );

    assert!(store.set(key, json!("overwritten")));
    assert_eq!(store.get(key), Some(json!("overwritten")));

    assert!(store.delete(key));
    assert!(!store.has(key));
    assert!(store.get(key).is_none());
    // Deleting an absent key still leaves it absent
    assert!(store.delete(key));

    assert!(store.set("a", json!(1)));
    assert!(store.set("b", json!(2)));
    assert!(store.clear());
    assert!(!store.has("a"));
    assert!(!store.has("b"));
}
