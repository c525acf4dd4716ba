//! Test observer that records every display refresh.

use outfitter_core::item::ItemPair;
use outfitter_core::observer::{Availability, SlotObserver};
use uuid::Uuid;

/// One `update_info` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoUpdate {
    /// Inventory that owns the slot.
    pub inventory: Uuid,
    /// New slot contents.
    pub pair: Option<ItemPair>,
    /// Save key of the slot.
    pub save_key: String,
    /// Slot index.
    pub slot_index: usize,
}

/// One `update_availability` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityUpdate {
    /// Inventory that owns the slot.
    pub inventory: Uuid,
    /// Slot index.
    pub slot_index: usize,
    /// Reported availability.
    pub availability: Availability,
}

/// An observer that records every call, in order.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    /// Recorded `update_info` calls.
    pub info: Vec<InfoUpdate>,
    /// Recorded `update_availability` calls.
    pub availability: Vec<AvailabilityUpdate>,
}

impl RecordingObserver {
    /// Creates an observer with nothing recorded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The last availability reported for a slot.
    #[must_use]
    pub fn last_availability(&self, inventory: Uuid, slot_index: usize) -> Option<Availability> {
        self.availability
            .iter()
            .rev()
            .find(|update| update.inventory == inventory && update.slot_index == slot_index)
            .map(|update| update.availability)
    }
}

impl SlotObserver for RecordingObserver {
    fn update_info(
        &mut self,
        inventory: Uuid,
        pair: Option<&ItemPair>,
        save_key: &str,
        slot_index: usize,
    ) {
        self.info.push(InfoUpdate {
            inventory,
            pair: pair.cloned(),
            save_key: save_key.to_owned(),
            slot_index,
        });
    }

    fn update_availability(
        &mut self,
        inventory: Uuid,
        slot_index: usize,
        availability: Availability,
    ) {
        self.availability.push(AvailabilityUpdate {
            inventory,
            slot_index,
            availability,
        });
    }
}
