//! Cache Module
//!
//! Facades that add key validation and lazy TTL expiry on top of a
//! [`Store`](crate::store::Store).
//!
//! - [`Cache`]: plain get/set/delete access to values
//! - [`ItemPool`]: mutable item handles with deferred, batched writes

pub mod expiry;
mod facade;
mod item;
mod key;
mod pool;
mod record;
mod stats;


// Re-export public types
pub use expiry::Ttl;
pub use facade::Cache;
pub use item::CacheItem;
pub use key::assert_valid_key;
pub use pool::ItemPool;
pub use record::CacheRecord;
pub use stats::CacheStats;

// == Public Constants ==
/// Characters that may not appear in a cache key.
pub const RESERVED_CHARACTERS: [char; 10] = ['(', ')', '{', '}', '[', ']', '/', '\\', ':', ';'];
