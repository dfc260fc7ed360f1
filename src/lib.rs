//! Mini Cache - A storage-agnostic caching facade
//!
//! Provides get/set/delete/clear over interchangeable stores with TTL
//! expiry and deferred, batched writes.

pub mod cache;
pub mod config;
pub mod error;
pub mod store;

pub use cache::{Cache, CacheItem, ItemPool, Ttl};
pub use config::Config;
pub use error::{CacheError, Result};
pub use store::Store;
