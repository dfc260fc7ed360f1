//! Cache Facade Module
//!
//! Key/value access over any [`Store`] with lazy TTL expiry.

use std::collections::HashMap;

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use crate::cache::expiry::{self, Ttl};
use crate::cache::key::assert_valid_key;
use crate::cache::record::{read_live, CacheRecord};
use crate::cache::CacheStats;
use crate::error::Result;
use crate::store::Store;

// == Cache ==
/// Client-facing cache over a store.
///
/// Every method taking a key validates it before the store is touched.
/// Store failures are reported as `Ok(false)`; only invalid keys are errors.
#[derive(Debug)]
pub struct Cache<S> {
    store: S,
    stats: Mutex<CacheStats>,
}

impl<S: Store> Cache<S> {
    // == Constructor ==
    /// Creates a cache over the given store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            stats: Mutex::new(CacheStats::new()),
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns a snapshot of the read statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.lock().clone()
    }

    // == Has ==
    /// Checks whether a record exists for `key`.
    ///
    /// Liveness is not checked: a stale record that has not been read yet
    /// still reports true. Use [`get`](Self::get) when freshness matters.
    pub fn has(&self, key: &str) -> Result<bool> {
        assert_valid_key(key)?;
        Ok(self.store.has(key))
    }

    // == Get ==
    /// Retrieves the live value stored under `key`.
    ///
    /// Returns None if the key is absent, the record is malformed or holds a
    /// different type, or the record has expired. Expired records are deleted.
    pub fn get<V: DeserializeOwned>(&self, key: &str) -> Result<Option<V>> {
        assert_valid_key(key)?;
        Ok(read_live::<S, V>(&self.store, key, &self.stats).map(|record| record.value))
    }

    /// Like [`get`](Self::get), falling back to `default` on a miss.
    pub fn get_or<V: DeserializeOwned>(&self, key: &str, default: V) -> Result<V> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    // == Set ==
    /// Stores `value` under `key`.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - Any serializable value
    /// * `ttl` - [`Ttl::Never`], seconds from now, or a duration
    pub fn set<V>(&self, key: &str, value: &V, ttl: impl Into<Ttl>) -> Result<bool>
    where
        V: Serialize + ?Sized,
    {
        assert_valid_key(key)?;
        let expiry = expiry::normalize_relative(ttl.into(), expiry::now());
        Ok(self.write(key, value, expiry))
    }

    fn write<V: Serialize + ?Sized>(&self, key: &str, value: &V, expiry: Option<i64>) -> bool {
        match CacheRecord::new(value, expiry).encode() {
            Some(payload) => self.store.set(key, payload),
            None => {
                warn!("Value for key {} cannot be encoded", key);
                false
            }
        }
    }

    // == Delete ==
    pub fn delete(&self, key: &str) -> Result<bool> {
        assert_valid_key(key)?;
        Ok(self.store.delete(key))
    }

    // == Clear ==
    /// Removes every record from the store.
    pub fn clear(&self) -> bool {
        info!("Clearing cache");
        self.store.clear()
    }

    // == Get Multiple ==
    /// Reads each key independently; misses map to a clone of `default`.
    pub fn get_multiple<I, K, V>(&self, keys: I, default: V) -> Result<HashMap<String, V>>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
        V: DeserializeOwned + Clone,
    {
        let mut values = HashMap::new();
        for key in keys {
            let key = key.as_ref();
            let value = self.get(key)?.unwrap_or_else(|| default.clone());
            values.insert(key.to_string(), value);
        }
        Ok(values)
    }

    // == Set Multiple ==
    /// Stores every pair with one shared TTL.
    ///
    /// Stops at the first failed write and returns false. Pairs written before
    /// the failure stay in place.
    pub fn set_multiple<I, K, V>(&self, pairs: I, ttl: impl Into<Ttl>) -> Result<bool>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Serialize,
    {
        let expiry = expiry::normalize_relative(ttl.into(), expiry::now());
        for (key, value) in pairs {
            let key = key.as_ref();
            assert_valid_key(key)?;
            if !self.write(key, &value, expiry) {
                warn!("set_multiple stopped at key {}", key);
                return Ok(false);
            }
        }
        Ok(true)
    }

    // == Delete Multiple ==
    /// Deletes each key, stopping at the first failure.
    pub fn delete_multiple<I, K>(&self, keys: I) -> Result<bool>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        for key in keys {
            if !self.delete(key.as_ref())? {
                warn!("delete_multiple stopped at key {}", key.as_ref());
                return Ok(false);
            }
        }
        Ok(true)
    }
}
