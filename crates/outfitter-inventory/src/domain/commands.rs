//! Commands for the Inventory context.

use outfitter_core::command::Command;
use outfitter_core::item::ItemId;
use uuid::Uuid;

/// Command to add to the persisted count of an item and place its stack.
#[derive(Debug, Clone)]
pub struct GainItem {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The inventory identifier.
    pub inventory_id: Uuid,
    /// The item gained.
    pub item: ItemId,
    /// How many units were gained.
    pub amount: u32,
}

/// Command to subtract from the persisted count of an item.
#[derive(Debug, Clone)]
pub struct LoseItem {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The inventory identifier.
    pub inventory_id: Uuid,
    /// The item lost.
    pub item: ItemId,
    /// How many units were lost.
    pub amount: u32,
}

/// Command to exchange two slots of the same inventory.
#[derive(Debug, Clone)]
pub struct SwitchSlots {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The inventory identifier.
    pub inventory_id: Uuid,
    /// First slot index.
    pub slot_a: usize,
    /// Second slot index.
    pub slot_b: usize,
}

impl Command for GainItem {
    fn command_type(&self) -> &'static str {
        "inventory.gain_item"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

impl Command for LoseItem {
    fn command_type(&self) -> &'static str {
        "inventory.lose_item"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

impl Command for SwitchSlots {
    fn command_type(&self) -> &'static str {
        "inventory.switch_slots"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
