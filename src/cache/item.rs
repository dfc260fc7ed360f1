//! Cache Item Module
//!
//! Mutable handles issued by [`ItemPool`](crate::cache::ItemPool).

use chrono::{DateTime, Utc};

use crate::cache::expiry::{self, Ttl};

// == Cache Item ==
/// A key with a pending value and expiry, living in caller memory until saved.
///
/// `hit` is fixed when the pool builds the item and does not change when the
/// value is later replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheItem<V> {
    key: String,
    value: Option<V>,
    expiry: Option<i64>,
    hit: bool,
    pool_id: u64,
}

impl<V> CacheItem<V> {
    pub(crate) fn miss(key: &str, pool_id: u64) -> Self {
        Self {
            key: key.to_string(),
            value: None,
            expiry: None,
            hit: false,
            pool_id,
        }
    }

    pub(crate) fn hit(key: &str, value: Option<V>, expiry: Option<i64>, pool_id: u64) -> Self {
        Self {
            key: key.to_string(),
            value,
            expiry,
            hit: true,
            pool_id,
        }
    }

    pub(crate) fn pool_id(&self) -> u64 {
        self.pool_id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the value, if one was loaded or set.
    pub fn get(&self) -> Option<&V> {
        self.value.as_ref()
    }

    pub fn into_value(self) -> Option<V> {
        self.value
    }

    pub fn set(&mut self, value: V) -> &mut Self {
        self.value = Some(value);
        self
    }

    // == Expires At ==
    /// Sets an absolute expiry; `None` means the item never expires.
    pub fn expires_at(&mut self, at: Option<DateTime<Utc>>) -> &mut Self {
        self.expiry = expiry::normalize_absolute(at);
        self
    }

    // == Expires After ==
    /// Sets the expiry relative to now.
    pub fn expires_after(&mut self, ttl: impl Into<Ttl>) -> &mut Self {
        self.expiry = expiry::normalize_relative(ttl.into(), expiry::now());
        self
    }

    /// Absolute expiry as a Unix timestamp in seconds.
    pub fn expiry(&self) -> Option<i64> {
        self.expiry
    }

    /// Whether the item was loaded from a live record.
    pub fn is_hit(&self) -> bool {
        self.hit
    }
}
