//! Notifications recorded by inventory mutations.

use outfitter_core::item::{ItemId, ItemPair};
use serde::Serialize;
use uuid::Uuid;

/// Event type name for `SlotUpdated`.
pub const SLOT_UPDATED_EVENT_TYPE: &str = "inventory.slot_updated";
/// Event type name for `CountChanged`.
pub const COUNT_CHANGED_EVENT_TYPE: &str = "inventory.count_changed";

/// Emitted when a slot's contents are replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotUpdated {
    /// The inventory identifier.
    pub inventory_id: Uuid,
    /// The slot that changed.
    pub slot_index: usize,
    /// New contents, `None` when the slot is now empty.
    pub pair: Option<ItemPair>,
    /// Save key of the slot.
    pub save_key: String,
}

/// Emitted when a persisted count is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountChanged {
    /// The inventory identifier.
    pub inventory_id: Uuid,
    /// The item whose count changed.
    pub item: ItemId,
    /// Save key the count is stored under.
    pub save_key: String,
    /// Count before the write.
    pub previous: u32,
    /// Count after the write.
    pub current: u32,
}

/// Notification variants for the Inventory context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum InventoryEvent {
    /// A slot's contents were replaced.
    SlotUpdated(SlotUpdated),
    /// A persisted count was written.
    CountChanged(CountChanged),
}

impl InventoryEvent {
    /// Returns the event type name.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::SlotUpdated(_) => SLOT_UPDATED_EVENT_TYPE,
            Self::CountChanged(_) => COUNT_CHANGED_EVENT_TYPE,
        }
    }
}
