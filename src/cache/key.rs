//! Key Validation Module
//!
//! Enforces the legal key grammar shared by [`Cache`](crate::cache::Cache) and
//! [`ItemPool`](crate::cache::ItemPool). Stores never validate keys themselves.

use crate::cache::RESERVED_CHARACTERS;
use crate::error::{CacheError, Result};

// == Assert Valid Key ==
/// Rejects keys containing any of [`RESERVED_CHARACTERS`].
///
/// Path separators in particular would escape the filesystem store's shard
/// layout, so this check must run before any store access.
pub fn assert_valid_key(key: &str) -> Result<()> {
    match key.chars().find(|c| RESERVED_CHARACTERS.contains(c)) {
        Some(c) => Err(CacheError::InvalidKey(format!(
            "Key '{}' contains reserved character '{}'",
            key, c
        ))),
        None => Ok(()),
    }
}
