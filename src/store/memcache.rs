//! Memcache adapter.
//!
//! Memcache has no existence command, so `has` fetches the value and reports
//! whether one came back.

use tracing::warn;

use super::{codec, ConnectionError, Payload, Store};

/// The subset of Memcache operations the adapter needs.
pub trait MemcacheConnection: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, ConnectionError>;
    fn set(&self, key: &str, value: &[u8]) -> Result<(), ConnectionError>;
    /// Returns whether an item was removed
    fn delete(&self, key: &str) -> Result<bool, ConnectionError>;
    fn flush(&self) -> Result<(), ConnectionError>;
}

#[derive(Debug)]
pub struct MemcacheStore<C> {
    connection: C,
}

impl<C: MemcacheConnection> MemcacheStore<C> {
    pub fn new(connection: C) -> Self {
        Self { connection }
    }
}

impl<C: MemcacheConnection> Store for MemcacheStore<C> {
    fn clear(&self) -> bool {
        self.connection
            .flush()
            .map_err(|e| warn!("flush failed: {}", e))
            .is_ok()
    }

    fn delete(&self, key: &str) -> bool {
        self.connection
            .delete(key)
            .map_err(|e| warn!("delete {} failed: {}", key, e))
            .is_ok()
    }

    fn get(&self, key: &str) -> Option<Payload> {
        match self.connection.get(key) {
            Ok(Some(bytes)) => codec::decode(&bytes),
            Ok(None) => None,
            Err(e) => {
                warn!("get {} failed: {}", key, e);
                None
            }
        }
    }

    fn has(&self, key: &str) -> bool {
        match self.connection.get(key) {
            Ok(found) => found.is_some(),
            Err(e) => {
                warn!("get {} failed: {}", key, e);
                false
            }
        }
    }

    fn set(&self, key: &str, payload: Payload) -> bool {
        let Some(bytes) = codec::encode(&payload) else {
            return false;
        };
        self.connection
            .set(key, &bytes)
            .map_err(|e| warn!("set {} failed: {}", key, e))
            .is_ok()
    }
}
