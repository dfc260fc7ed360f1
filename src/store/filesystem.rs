//! Filesystem Store Module
//!
//! One file per key, sharded across a bounded two-level directory tree.
//!
//! # Layout
//! `<root>/<l1>/<l2>/<key>` where, for the CRC-32C `hash` of the key,
//! `l1 = (hash / 100) % 100` and `l2 = hash % 100`. At most 100 x 100 leaf
//! directories exist no matter how many keys are stored.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crc32c::crc32c;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use super::{codec, Payload, Store};

/// Number of directories on each shard level.
pub const SHARD_FANOUT: u32 = 100;

// == File System Store ==
/// Persists each payload as a serialized file under `root`.
#[derive(Debug, Clone)]
pub struct FileSystemStore {
    root: PathBuf,
}

impl FileSystemStore {
    // == Constructor ==
    /// Creates a store rooted at `root`. Nothing is created on disk until the
    /// first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    // == Path For ==
    /// Maps a key to its file path. The mapping is deterministic.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let (l1, l2) = shard_of(key);
        self.root
            .join(l1.to_string())
            .join(l2.to_string())
            .join(key)
    }

    fn write_atomically(&self, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        let parent = path.parent().unwrap_or(&self.root);
        if !parent.is_dir() {
            fs::create_dir_all(parent)?;
            debug!("Created shard directory {}", parent.display());
        }

        // Readers never observe a half-written file: the rename replaces the
        // old file in one step.
        let mut temp = NamedTempFile::new_in(parent)?;
        temp.write_all(bytes)?;
        temp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    fn clear_contents(&self) -> std::io::Result<()> {
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                fs::remove_dir_all(entry.path())?;
            } else {
                fs::remove_file(entry.path())?;
            }
        }
        Ok(())
    }
}

// == Shard Of ==
/// Returns the two shard indices for a key.
pub(crate) fn shard_of(key: &str) -> (u32, u32) {
    let hash = crc32c(key.as_bytes());
    ((hash / SHARD_FANOUT) % SHARD_FANOUT, hash % SHARD_FANOUT)
}

impl Store for FileSystemStore {
    fn clear(&self) -> bool {
        if !self.root.is_dir() {
            return true;
        }
        match self.clear_contents() {
            Ok(()) => {
                info!("Cleared filesystem store at {}", self.root.display());
                true
            }
            Err(e) => {
                warn!("Failed to clear {}: {}", self.root.display(), e);
                false
            }
        }
    }

    fn delete(&self, key: &str) -> bool {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Delete of absent key {}", key);
                true
            }
            Err(e) => {
                warn!("Failed to delete {}: {}", path.display(), e);
                false
            }
        }
    }

    fn get(&self, key: &str) -> Option<Payload> {
        let path = self.path_for(key);
        match fs::read(&path) {
            Ok(bytes) => codec::decode(&bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }

    fn has(&self, key: &str) -> bool {
        self.path_for(key).is_file()
    }

    fn set(&self, key: &str, payload: Payload) -> bool {
        let Some(bytes) = codec::encode(&payload) else {
            return false;
        };
        let path = self.path_for(key);
        match self.write_atomically(&path, &bytes) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to write {}: {}", path.display(), e);
                false
            }
        }
    }
}
