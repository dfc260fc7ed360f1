//! Item Pool Module
//!
//! Item-handle access over a [`Store`] with a deferred-write queue.
//!
//! The deferred queue is owned by the pool and only reachable through
//! `&mut self`, so a pool shared between threads needs external locking.

use std::collections::HashMap;
use std::mem;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cache::key::assert_valid_key;
use crate::cache::record::{read_live, CacheRecord};
use crate::cache::{CacheItem, CacheStats};
use crate::error::{CacheError, Result};
use crate::store::Store;

static NEXT_POOL_ID: AtomicU64 = AtomicU64::new(1);

// == Item Pool ==
/// Pool of [`CacheItem`] handles holding values of type `V`.
#[derive(Debug)]
pub struct ItemPool<S, V> {
    store: S,
    id: u64,
    deferred: Vec<CacheItem<V>>,
    stats: Mutex<CacheStats>,
}

impl<S, V> ItemPool<S, V>
where
    S: Store,
    V: Serialize + DeserializeOwned,
{
    // == Constructor ==
    pub fn new(store: S) -> Self {
        Self {
            store,
            id: NEXT_POOL_ID.fetch_add(1, Ordering::Relaxed),
            deferred: Vec::new(),
            stats: Mutex::new(CacheStats::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.lock().clone()
    }

    /// Number of items waiting for [`commit`](Self::commit).
    pub fn deferred_len(&self) -> usize {
        self.deferred.len()
    }

    // == Get Item ==
    /// Loads the item for `key`.
    ///
    /// A live record yields a hit carrying its value and expiry. Absent,
    /// malformed or stale records yield a fresh miss; stale ones are deleted.
    pub fn get_item(&self, key: &str) -> Result<CacheItem<V>> {
        assert_valid_key(key)?;
        let item = match read_live::<S, Option<V>>(&self.store, key, &self.stats) {
            Some(record) => CacheItem::hit(key, record.value, record.expiry, self.id),
            None => CacheItem::miss(key, self.id),
        };
        Ok(item)
    }

    pub fn get_items<I, K>(&self, keys: I) -> Result<HashMap<String, CacheItem<V>>>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut items = HashMap::new();
        for key in keys {
            let key = key.as_ref();
            items.insert(key.to_string(), self.get_item(key)?);
        }
        Ok(items)
    }

    // == Has Item ==
    /// Existence check only; see [`Cache::has`](crate::cache::Cache::has).
    pub fn has_item(&self, key: &str) -> Result<bool> {
        assert_valid_key(key)?;
        Ok(self.store.has(key))
    }

    // == Save ==
    /// Persists the item's value and expiry under its key.
    ///
    /// # Errors
    /// [`CacheError::InvalidArgument`] if the item was issued by another pool.
    pub fn save(&self, item: &CacheItem<V>) -> Result<bool> {
        if item.pool_id() != self.id {
            return Err(CacheError::InvalidArgument(format!(
                "Item '{}' was not issued by this pool",
                item.key()
            )));
        }

        let record = CacheRecord::new(item.get(), item.expiry());
        match record.encode() {
            Some(payload) => Ok(self.store.set(item.key(), payload)),
            None => {
                warn!("Value for key {} cannot be encoded", item.key());
                Ok(false)
            }
        }
    }

    // == Save Deferred ==
    /// Queues the item for the next [`commit`](Self::commit). Nothing is
    /// written yet.
    pub fn save_deferred(&mut self, item: CacheItem<V>) -> bool {
        debug!("Deferred save of key {}", item.key());
        self.deferred.push(item);
        true
    }

    // == Commit ==
    /// Saves queued items in insertion order.
    ///
    /// The queue is emptied whatever the outcome. On the first failure the
    /// remaining items are dropped without being attempted, and items saved
    /// before it stay persisted.
    pub fn commit(&mut self) -> Result<bool> {
        let queued = mem::take(&mut self.deferred);
        let total = queued.len();

        for (saved, item) in queued.iter().enumerate() {
            if !self.save(item)? {
                warn!(
                    "Commit stopped at key {} after {} of {} items; {} dropped",
                    item.key(),
                    saved,
                    total,
                    total - saved - 1
                );
                return Ok(false);
            }
        }

        if total > 0 {
            info!("Committed {} deferred items", total);
        }
        Ok(true)
    }

    // == Delete Item ==
    pub fn delete_item(&self, key: &str) -> Result<bool> {
        assert_valid_key(key)?;
        Ok(self.store.delete(key))
    }

    /// Deletes each key, stopping at the first failure.
    pub fn delete_items<I, K>(&self, keys: I) -> Result<bool>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        for key in keys {
            if !self.delete_item(key.as_ref())? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    // == Clear ==
    /// Removes every record from the store. Deferred items are kept.
    pub fn clear(&self) -> bool {
        info!("Clearing item pool");
        self.store.clear()
    }
}
