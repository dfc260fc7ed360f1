//! Expiry Module
//!
//! Normalizes caller-supplied expirations into absolute Unix timestamps and
//! decides liveness. Both facades go through these functions so that `get`,
//! `get_item` and the write paths agree on what "stale" means.

use chrono::{DateTime, Utc};

// == Time To Live ==
/// A relative lifetime for a cache record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ttl {
    /// The record never expires
    #[default]
    Never,
    /// Expires this many seconds from now
    Seconds(i64),
    /// Expires after this duration from now
    Duration(chrono::Duration),
}

impl From<i64> for Ttl {
    fn from(seconds: i64) -> Self {
        Ttl::Seconds(seconds)
    }
}

impl From<u64> for Ttl {
    fn from(seconds: u64) -> Self {
        Ttl::Seconds(i64::try_from(seconds).unwrap_or(i64::MAX))
    }
}

impl From<chrono::Duration> for Ttl {
    fn from(duration: chrono::Duration) -> Self {
        Ttl::Duration(duration)
    }
}

impl From<std::time::Duration> for Ttl {
    fn from(duration: std::time::Duration) -> Self {
        chrono::Duration::from_std(duration)
            .map(Ttl::Duration)
            .unwrap_or(Ttl::Seconds(i64::MAX))
    }
}

impl<T: Into<Ttl>> From<Option<T>> for Ttl {
    fn from(ttl: Option<T>) -> Self {
        ttl.map_or(Ttl::Never, Into::into)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in seconds.
pub fn now() -> i64 {
    Utc::now().timestamp()
}

// == Normalize Absolute ==
/// Converts a point in time into a Unix timestamp, passing `None` through.
pub fn normalize_absolute(at: Option<DateTime<Utc>>) -> Option<i64> {
    at.map(|at| at.timestamp())
}

// == Normalize Relative ==
/// Converts a TTL into an absolute Unix timestamp relative to `now`.
///
/// # Returns
/// - `None` for [`Ttl::Never`]
/// - `Some(now + ttl)` otherwise, saturating on overflow
pub fn normalize_relative(ttl: Ttl, now: i64) -> Option<i64> {
    match ttl {
        Ttl::Never => None,
        Ttl::Seconds(seconds) => Some(now.saturating_add(seconds)),
        Ttl::Duration(duration) => Some(now.saturating_add(duration.num_seconds())),
    }
}

// == Is Live ==
/// A record is live iff it has no expiry or its expiry is strictly after `now`.
pub fn is_live(expiry: Option<i64>, now: i64) -> bool {
    match expiry {
        Some(expiry) => expiry > now,
        None => true,
    }
}
