//! Test count store that records every write.

use outfitter_core::item::ItemId;
use outfitter_core::persistence::{CountStore, MemoryCountStore};

/// A count store that keeps counts in memory and records every
/// `set_count` call, in order.
#[derive(Debug, Default)]
pub struct RecordingCountStore {
    inner: MemoryCountStore,
    writes: Vec<(ItemId, String, u32)>,
}

impl RecordingCountStore {
    /// Creates an empty recording store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every write as `(item, save key, value)`.
    #[must_use]
    pub fn writes(&self) -> &[(ItemId, String, u32)] {
        &self.writes
    }

    /// Forgets recorded writes, keeping the counts.
    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }
}

impl CountStore for RecordingCountStore {
    fn get_count(&self, item: &ItemId, save_key: &str, default: u32) -> u32 {
        self.inner.get_count(item, save_key, default)
    }

    fn set_count(&mut self, item: &ItemId, save_key: &str, value: u32) {
        self.writes.push((item.clone(), save_key.to_owned(), value));
        self.inner.set_count(item, save_key, value);
    }
}
