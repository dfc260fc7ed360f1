//! Redis adapter.
//!
//! The wire protocol lives behind [`RedisConnection`]; this store only maps the
//! capability onto native commands and serializes payloads with the shared
//! codec.

use tracing::warn;

use super::{codec, ConnectionError, Payload, Store};

/// The subset of Redis commands the adapter needs.
pub trait RedisConnection: Send + Sync {
    /// `EXISTS key`
    fn exists(&self, key: &str) -> Result<bool, ConnectionError>;
    /// `GET key`
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, ConnectionError>;
    /// `SET key value`
    fn set(&self, key: &str, value: &[u8]) -> Result<(), ConnectionError>;
    /// `DEL key`, returning the number of keys removed
    fn del(&self, key: &str) -> Result<u64, ConnectionError>;
    /// `FLUSHDB`
    fn flushdb(&self) -> Result<(), ConnectionError>;
}

#[derive(Debug)]
pub struct RedisStore<C> {
    connection: C,
}

impl<C: RedisConnection> RedisStore<C> {
    pub fn new(connection: C) -> Self {
        Self { connection }
    }
}

impl<C: RedisConnection> Store for RedisStore<C> {
    fn clear(&self) -> bool {
        self.connection
            .flushdb()
            .map_err(|e| warn!("FLUSHDB failed: {}", e))
            .is_ok()
    }

    fn delete(&self, key: &str) -> bool {
        self.connection
            .del(key)
            .map_err(|e| warn!("DEL {} failed: {}", key, e))
            .is_ok()
    }

    fn get(&self, key: &str) -> Option<Payload> {
        match self.connection.get(key) {
            Ok(Some(bytes)) => codec::decode(&bytes),
            Ok(None) => None,
            Err(e) => {
                warn!("GET {} failed: {}", key, e);
                None
            }
        }
    }

    fn has(&self, key: &str) -> bool {
        self.connection.exists(key).unwrap_or_else(|e| {
            warn!("EXISTS {} failed: {}", key, e);
            false
        })
    }

    fn set(&self, key: &str, payload: Payload) -> bool {
        let Some(bytes) = codec::encode(&payload) else {
            return false;
        };
        self.connection
            .set(key, &bytes)
            .map_err(|e| warn!("SET {} failed: {}", key, e))
            .is_ok()
    }
}
