//! Configuration Module
//!
//! Selects and builds the store backend from environment variables.

use std::env;
use std::path::PathBuf;

use crate::store::{FileSystemStore, MemoryStore, Store};

/// Which backend [`Config::build_store`] constructs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Memory,
    Filesystem,
}

impl StoreKind {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Some(StoreKind::Memory),
            "filesystem" | "fs" => Some(StoreKind::Filesystem),
            _ => None,
        }
    }
}

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend to use
    pub store: StoreKind,
    /// Root directory of the filesystem store
    pub cache_dir: PathBuf,
    /// TTL in seconds for writes that do not give one, None = never expire
    pub default_ttl: Option<i64>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_STORE` - `memory` or `filesystem` (default: filesystem)
    /// - `CACHE_DIR` - Filesystem store root (default: `<temp dir>/mini_cache`)
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: none)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            store: env::var("CACHE_STORE")
                .ok()
                .and_then(|v| StoreKind::parse(&v))
                .unwrap_or(defaults.store),
            cache_dir: env::var_os("CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_dir),
            default_ttl: env::var("DEFAULT_TTL").ok().and_then(|v| v.parse().ok()),
        }
    }

    /// Builds the configured store.
    pub fn build_store(&self) -> Box<dyn Store> {
        match self.store {
            StoreKind::Memory => Box::new(MemoryStore::new()),
            StoreKind::Filesystem => Box::new(FileSystemStore::new(&self.cache_dir)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreKind::Filesystem,
            cache_dir: env::temp_dir().join("mini_cache"),
            default_ttl: None,
        }
    }
}
