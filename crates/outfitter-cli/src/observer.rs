//! Slot observer that reports display refreshes as tracing events.

use outfitter_core::item::ItemPair;
use outfitter_core::observer::{Availability, SlotObserver};
use tracing::debug;
use uuid::Uuid;

/// Logs every refresh at `debug` level and counts them.
#[derive(Debug, Default)]
pub struct TracingObserver {
    refreshed: usize,
}

impl TracingObserver {
    /// Creates an observer with nothing counted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of refreshes seen so far.
    #[must_use]
    pub fn refreshed(&self) -> usize {
        self.refreshed
    }
}

impl SlotObserver for TracingObserver {
    fn update_info(
        &mut self,
        inventory: Uuid,
        pair: Option<&ItemPair>,
        save_key: &str,
        slot_index: usize,
    ) {
        self.refreshed += 1;
        debug!(
            inventory_id = %inventory,
            slot_index,
            save_key,
            item = ?pair.map(|pair| pair.item.as_str()),
            amount = pair.map_or(0, |pair| pair.amount),
            "Slot display refreshed"
        );
    }

    fn update_availability(
        &mut self,
        inventory: Uuid,
        slot_index: usize,
        availability: Availability,
    ) {
        self.refreshed += 1;
        debug!(
            inventory_id = %inventory,
            slot_index,
            availability = ?availability,
            "Slot availability refreshed"
        );
    }
}
