//! Integration Tests for the Cache facade
//!
//! Runs the facade over the filesystem store and over a call-recording store.

use std::fs;
use std::sync::Arc;
use std::thread::sleep;
use std::time::Duration;

use mini_cache::store::{FileSystemStore, MemoryStore, Payload};
use mini_cache::{Cache, CacheError, Store, Ttl};
use parking_lot::Mutex;
use serde_json::json;
use tempfile::TempDir;

// == Helper Types ==

/// Memory store that records every call it receives.
#[derive(Default)]
struct SpyStore {
    inner: MemoryStore,
    calls: Mutex<Vec<String>>,
}

impl SpyStore {
    fn record(&self, call: &str, key: &str) {
        self.calls.lock().push(format!("{}:{}", call, key));
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

impl Store for SpyStore {
    fn clear(&self) -> bool {
        self.record("clear", "");
        self.inner.clear()
    }

    fn delete(&self, key: &str) -> bool {
        self.record("delete", key);
        self.inner.delete(key)
    }

    fn get(&self, key: &str) -> Option<Payload> {
        self.record("get", key);
        self.inner.get(key)
    }

    fn has(&self, key: &str) -> bool {
        self.record("has", key);
        self.inner.has(key)
    }

    fn set(&self, key: &str, payload: Payload) -> bool {
        self.record("set", key);
        self.inner.set(key, payload)
    }
}

/// Store whose writes succeed until a given key is reached.
struct FailingStore {
    inner: MemoryStore,
    fail_on: &'static str,
}

impl Store for FailingStore {
    fn clear(&self) -> bool {
        self.inner.clear()
    }

    fn delete(&self, key: &str) -> bool {
        key != self.fail_on && self.inner.delete(key)
    }

    fn get(&self, key: &str) -> Option<Payload> {
        self.inner.get(key)
    }

    fn has(&self, key: &str) -> bool {
        self.inner.has(key)
    }

    fn set(&self, key: &str, payload: Payload) -> bool {
        key != self.fail_on && self.inner.set(key, payload)
    }
}

fn fs_cache() -> (TempDir, Cache<FileSystemStore>) {
    let dir = TempDir::new().unwrap();
    let cache = Cache::new(FileSystemStore::new(dir.path()));
    (dir, cache)
}

// == Filesystem Round Trips ==

#[test]
fn test_filesystem_round_trip() {
    let (_dir, cache) = fs_cache();

    assert!(cache.set("somekey", "somevalue", Ttl::Never).unwrap());
    assert_eq!(
        cache.get::<String>("somekey").unwrap(),
        Some("somevalue".to_string())
    );

    assert!(cache.delete("somekey").unwrap());
    assert!(!cache.has("somekey").unwrap());
    assert_eq!(cache.get_or("somekey", "default".to_string()).unwrap(), "default");
}

#[test]
fn test_filesystem_get_multiple() {
    let (_dir, cache) = fs_cache();

    cache.set("a", "x", Ttl::Never).unwrap();
    assert!(cache.set_multiple([("b", "y")], Ttl::Never).unwrap());

    let values = cache.get_multiple(["a", "b"], String::new()).unwrap();
    assert_eq!(values.len(), 2);
    assert_eq!(values["a"], "x");
    assert_eq!(values["b"], "y");
}

#[test]
fn test_filesystem_lazy_eviction_removes_file() {
    let (_dir, cache) = fs_cache();
    cache.set("stale", "value", -10i64).unwrap();
    let path = cache.store().path_for("stale");
    assert!(path.is_file());

    assert_eq!(cache.get::<String>("stale").unwrap(), None);
    assert!(!path.exists());
    assert!(!cache.has("stale").unwrap());
}

#[test]
fn test_filesystem_ttl_expiration() {
    let (_dir, cache) = fs_cache();
    cache.set("short", "value", 1i64).unwrap();
    cache.set("long", "value", 3600i64).unwrap();

    sleep(Duration::from_millis(2100));

    assert_eq!(cache.get::<String>("short").unwrap(), None);
    assert!(!cache.has("short").unwrap());
    assert_eq!(cache.get::<String>("long").unwrap(), Some("value".to_string()));
}

#[test]
fn test_filesystem_record_without_expiry_is_a_miss() {
    let (_dir, cache) = fs_cache();
    let path = cache.store().path_for("foreign");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, br#"{"value":"x"}"#).unwrap();

    assert!(cache.has("foreign").unwrap());
    assert_eq!(cache.get_or("foreign", "default".to_string()).unwrap(), "default");
}

#[test]
fn test_filesystem_clear() {
    let (dir, cache) = fs_cache();
    let keys: Vec<String> = (0..50).map(|i| format!("key-{}", i)).collect();
    for key in &keys {
        cache.set(key, key, 60i64).unwrap();
    }

    assert!(cache.clear());
    for key in &keys {
        assert!(!cache.has(key).unwrap());
    }
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

// == Has / Get Asymmetry ==

#[test]
fn test_has_reports_unread_stale_records() {
    let cache = Cache::new(MemoryStore::new());
    cache.set("stale", "value", 0i64).unwrap();

    // Existence only: the stale record is still there until a read evicts it
    assert!(cache.has("stale").unwrap());
    assert_eq!(cache.get::<String>("stale").unwrap(), None);
    assert!(!cache.has("stale").unwrap());
}

// == Validation Before Store Access ==

#[test]
fn test_invalid_key_makes_no_store_calls() {
    let spy = Arc::new(SpyStore::default());
    let cache = Cache::new(Arc::clone(&spy));

    assert!(matches!(cache.has("my/key"), Err(CacheError::InvalidKey(_))));
    assert!(matches!(cache.get::<String>("my/key"), Err(CacheError::InvalidKey(_))));
    assert!(matches!(
        cache.set("my/key", "v", Ttl::Never),
        Err(CacheError::InvalidKey(_))
    ));
    assert!(matches!(cache.delete("my/key"), Err(CacheError::InvalidKey(_))));
    assert!(matches!(
        cache.get_multiple(["my/key"], 0),
        Err(CacheError::InvalidKey(_))
    ));
    assert!(matches!(
        cache.set_multiple([("my/key", 1)], Ttl::Never),
        Err(CacheError::InvalidKey(_))
    ));
    assert!(matches!(
        cache.delete_multiple(["my/key"]),
        Err(CacheError::InvalidKey(_))
    ));

    assert!(spy.calls().is_empty());
}

#[test]
fn test_get_call_sequence() {
    let spy = Arc::new(SpyStore::default());
    let cache = Cache::new(Arc::clone(&spy));

    cache.get::<String>("absent").unwrap();
    cache.set("stale", "v", -1i64).unwrap();
    cache.get::<String>("stale").unwrap();

    assert_eq!(
        spy.calls(),
        vec![
            "has:absent",
            "set:stale",
            "has:stale",
            "get:stale",
            "delete:stale",
        ]
    );
}

// == Fail-Fast Bulk Operations ==

#[test]
fn test_set_multiple_stops_at_store_failure() {
    let cache = Cache::new(FailingStore {
        inner: MemoryStore::new(),
        fail_on: "b",
    });

    let written = cache
        .set_multiple([("a", 1), ("b", 2), ("c", 3)], Ttl::Never)
        .unwrap();

    assert!(!written);
    assert!(cache.has("a").unwrap());
    assert!(!cache.has("b").unwrap());
    assert!(!cache.has("c").unwrap());
}

#[test]
fn test_delete_multiple_stops_at_store_failure() {
    let cache = Cache::new(FailingStore {
        inner: MemoryStore::new(),
        fail_on: "b",
    });
    for key in ["a", "c"] {
        cache.set(key, &1, Ttl::Never).unwrap();
    }

    assert!(!cache.delete_multiple(["a", "b", "c"]).unwrap());
    assert!(!cache.has("a").unwrap());
    assert!(cache.has("c").unwrap());
}

// == Shared Stores ==

#[test]
fn test_facades_sharing_a_store_see_each_others_writes() {
    let store = Arc::new(MemoryStore::new());
    let first = Cache::new(Arc::clone(&store));
    let second = Cache::new(Arc::clone(&store));

    first.set("k", "one", Ttl::Never).unwrap();
    second.set("k", "two", Ttl::Never).unwrap();

    assert_eq!(first.get::<String>("k").unwrap(), Some("two".to_string()));
}

#[test]
fn test_boxed_store() {
    let store: Box<dyn Store> = Box::new(MemoryStore::new());
    let cache = Cache::new(store);

    cache.set("k", &json!({ "nested": [1, 2] }), Ttl::Never).unwrap();
    assert_eq!(
        cache.get::<serde_json::Value>("k").unwrap(),
        Some(json!({ "nested": [1, 2] }))
    );
}
