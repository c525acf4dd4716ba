//! Fixed storage positions inside an inventory.

use outfitter_core::item::{ItemId, ItemPair};
use serde::Serialize;

/// A fixed position in an inventory holding at most one item stack.
///
/// A slot is rebuilt rather than edited whenever its contents change; its
/// index and save key never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot {
    index: usize,
    pair: Option<ItemPair>,
    save_key: String,
    storage_index: Option<usize>,
}

impl Slot {
    /// Creates a slot. A pair with a zero amount is normalized to empty.
    #[must_use]
    pub fn new(
        index: usize,
        save_key: &str,
        pair: Option<ItemPair>,
        storage_index: Option<usize>,
    ) -> Self {
        let pair = pair.filter(|pair| pair.amount > 0);
        let storage_index = pair.as_ref().and(storage_index);
        Self {
            index,
            pair,
            save_key: save_key.to_owned(),
            storage_index,
        }
    }

    /// Creates an empty slot.
    #[must_use]
    pub fn empty(index: usize, save_key: &str) -> Self {
        Self::new(index, save_key, None, None)
    }

    /// Rebuilds this slot with new contents, keeping its index and save key.
    #[must_use]
    pub fn with_pair(&self, pair: Option<ItemPair>, storage_index: Option<usize>) -> Self {
        Self::new(self.index, &self.save_key, pair, storage_index)
    }

    /// Position of the slot within its inventory.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current contents, `None` when empty.
    #[must_use]
    pub fn pair(&self) -> Option<&ItemPair> {
        self.pair.as_ref()
    }

    /// The held item, if any.
    #[must_use]
    pub fn item(&self) -> Option<&ItemId> {
        self.pair.as_ref().map(|pair| &pair.item)
    }

    /// The held count, zero when empty.
    #[must_use]
    pub fn amount(&self) -> u32 {
        self.pair.as_ref().map_or(0, |pair| pair.amount)
    }

    /// Namespace under which the held count is persisted.
    #[must_use]
    pub fn save_key(&self) -> &str {
        &self.save_key
    }

    /// Catalog position of the held item, kept so the UI and storage agree
    /// after moves.
    #[must_use]
    pub fn storage_index(&self) -> Option<usize> {
        self.storage_index
    }

    /// Returns `true` if the slot holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pair.is_none()
    }
}
