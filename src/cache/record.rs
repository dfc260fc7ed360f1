//! Cache Record Module
//!
//! Defines the `{ value, expiry }` unit that facades hand to a store.

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::{expiry, CacheStats};
use crate::store::{Payload, Store};

// == Cache Record ==
/// A value paired with its absolute expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheRecord<V> {
    /// The stored value
    pub value: V,
    /// Expiration timestamp (Unix seconds), None = no expiration
    pub expiry: Option<i64>,
}

impl<V> CacheRecord<V> {
    // == Constructor ==
    /// Creates a new record with an optional absolute expiry.
    pub fn new(value: V, expiry: Option<i64>) -> Self {
        Self { value, expiry }
    }

    // == Is Live ==
    /// Checks liveness against the given timestamp.
    pub fn is_live(&self, now: i64) -> bool {
        expiry::is_live(self.expiry, now)
    }
}

impl<V: Serialize> CacheRecord<V> {
    // == Encode ==
    /// Converts the record into a store payload.
    ///
    /// Returns None if the value cannot be represented (e.g. a map with
    /// non-string keys).
    pub fn encode(&self) -> Option<Payload> {
        serde_json::to_value(self).ok()
    }
}

impl<V: DeserializeOwned> CacheRecord<V> {
    // == Decode ==
    /// Reads a record back from a store payload.
    ///
    /// Both fields must be present: a payload without an `expiry` member is
    /// foreign data, not a record that never expires.
    pub fn decode(payload: Payload) -> Option<Self> {
        let Value::Object(mut fields) = payload else {
            return None;
        };
        let expiry = match fields.remove("expiry")? {
            Value::Null => None,
            Value::Number(n) => Some(n.as_i64()?),
            _ => return None,
        };
        let value = serde_json::from_value(fields.remove("value")?).ok()?;
        Some(Self { value, expiry })
    }
}

// == Read Live ==
/// Lookup shared by both facades: existence check, decode, liveness check.
///
/// A stale record is deleted before returning. Absent, unreadable and stale
/// records all come back as None.
pub(crate) fn read_live<S, V>(
    store: &S,
    key: &str,
    stats: &Mutex<CacheStats>,
) -> Option<CacheRecord<V>>
where
    S: Store + ?Sized,
    V: DeserializeOwned,
{
    if !store.has(key) {
        debug!("Cache miss for key {}", key);
        stats.lock().record_miss();
        return None;
    }

    let Some(record) = store.get(key).and_then(CacheRecord::<V>::decode) else {
        warn!("Ignoring malformed record for key {}", key);
        stats.lock().record_miss();
        return None;
    };

    if record.is_live(expiry::now()) {
        stats.lock().record_hit();
        return Some(record);
    }

    if !store.delete(key) {
        warn!("Failed to evict stale key {}", key);
    }
    debug!("Evicted stale key {}", key);
    stats.lock().record_expired();
    None
}
