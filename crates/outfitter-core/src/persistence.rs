//! Persistence adapter for per-item counts.
//!
//! Counts are keyed by `(item, save key)`; the save key is the namespace of
//! the inventory that owns the count.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::DomainError;
use crate::item::ItemId;

/// Key/value store mapping `(item, save key)` to a count.
pub trait CountStore {
    /// Returns the saved count, or `default` if nothing was saved.
    fn get_count(&self, item: &ItemId, save_key: &str, default: u32) -> u32;

    /// Saves a count, replacing any previous value.
    fn set_count(&mut self, item: &ItemId, save_key: &str, value: u32);
}

/// Builds the flat storage key for a count.
#[must_use]
pub fn storage_key(item: &ItemId, save_key: &str) -> String {
    format!("{save_key}:{item}")
}

/// A count store that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryCountStore {
    counts: HashMap<String, u32>,
}

impl MemoryCountStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of saved counts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if nothing has been saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl CountStore for MemoryCountStore {
    fn get_count(&self, item: &ItemId, save_key: &str, default: u32) -> u32 {
        self.counts
            .get(&storage_key(item, save_key))
            .copied()
            .unwrap_or(default)
    }

    fn set_count(&mut self, item: &ItemId, save_key: &str, value: u32) {
        self.counts.insert(storage_key(item, save_key), value);
    }
}

/// A count store backed by a JSON object on disk.
///
/// Writes go to memory; `flush` rewrites the whole file.
#[derive(Debug)]
pub struct JsonFileCountStore {
    path: PathBuf,
    counts: BTreeMap<String, u32>,
    dirty: bool,
}

impl JsonFileCountStore {
    /// Opens the store at `path`. A missing file yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the file exists but cannot be
    /// read or is not a JSON object of counts.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        let counts = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                DomainError::Infrastructure(format!(
                    "save file {} is corrupt: {e}",
                    path.display()
                ))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(DomainError::Infrastructure(format!(
                    "failed to read {}: {e}",
                    path.display()
                )));
            }
        };
        info!(path = %path.display(), entries = counts.len(), "Opened save file");
        Ok(Self {
            path,
            counts,
            dirty: false,
        })
    }

    /// Returns the file this store writes to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes all counts to disk if anything changed since the last flush.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the file cannot be written.
    pub fn flush(&mut self) -> Result<(), DomainError> {
        if !self.dirty {
            return Ok(());
        }
        let json = serde_json::to_string_pretty(&self.counts)
            .map_err(|e| DomainError::Infrastructure(format!("save serialization failed: {e}")))?;
        fs::write(&self.path, json).map_err(|e| {
            DomainError::Infrastructure(format!("failed to write {}: {e}", self.path.display()))
        })?;
        self.dirty = false;
        debug!(path = %self.path.display(), "Flushed save file");
        Ok(())
    }
}

impl CountStore for JsonFileCountStore {
    fn get_count(&self, item: &ItemId, save_key: &str, default: u32) -> u32 {
        self.counts
            .get(&storage_key(item, save_key))
            .copied()
            .unwrap_or(default)
    }

    fn set_count(&mut self, item: &ItemId, save_key: &str, value: u32) {
        self.counts.insert(storage_key(item, save_key), value);
        self.dirty = true;
    }
}
