//! Query handlers for the Inventory context.
//!
//! Builds read-only, serializable views of inventories for display.

use outfitter_core::item::{ClothingCategory, ItemId};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::aggregates::Inventory;

/// Read-only view of one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotView {
    /// Slot index.
    pub index: usize,
    /// Held item, `None` when empty.
    pub item: Option<ItemId>,
    /// Display name of the held item.
    pub display_name: Option<String>,
    /// Icon of the held item.
    pub icon: Option<String>,
    /// Category of the held item.
    pub category: Option<ClothingCategory>,
    /// Held count, zero when empty.
    pub amount: u32,
}

/// Read-only view of an inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryView {
    /// The inventory identifier.
    pub inventory_id: Uuid,
    /// Save key namespace.
    pub save_key: String,
    /// Whether slots are category-routed.
    pub clothing: bool,
    /// Slots in index order.
    pub slots: Vec<SlotView>,
}

/// Builds a view of `inventory`.
#[must_use]
pub fn view_inventory(inventory: &Inventory) -> InventoryView {
    let catalog = inventory.catalog();
    let slots = inventory
        .slots()
        .iter()
        .map(|slot| {
            let definition = slot.item().and_then(|item| catalog.get(item));
            SlotView {
                index: slot.index(),
                item: slot.item().cloned(),
                display_name: definition.map(|item| item.display_name.clone()),
                icon: definition.map(|item| item.icon.clone()),
                category: definition.map(|item| item.category),
                amount: slot.amount(),
            }
        })
        .collect();
    InventoryView {
        inventory_id: inventory.id,
        save_key: inventory.save_key().to_owned(),
        clothing: inventory.is_clothing(),
        slots,
    }
}

#[cfg(test)]
mod tests {
    use outfitter_core::persistence::MemoryCountStore;
    use outfitter_test_support::{items, sample_catalog};
    use uuid::Uuid;

    use super::view_inventory;
    use crate::domain::aggregates::Inventory;

    #[test]
    fn test_view_inventory_describes_clothing_slots() {
        // Arrange
        let mut store = MemoryCountStore::new();
        let mut inventory =
            Inventory::clothing(Uuid::new_v4(), "wardrobe", sample_catalog(), &store);
        inventory.gain_item_amount(&items::straw_hat(), 1, &mut store).unwrap();

        // Act
        let view = view_inventory(&inventory);

        // Assert
        assert!(view.clothing);
        assert_eq!(view.slots.len(), 2);
        assert_eq!(view.slots[0].display_name.as_deref(), Some("Straw Hat"));
        assert_eq!(view.slots[0].amount, 1);
        assert_eq!(view.slots[1].item, None);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["slots"][0]["category"], "head");
    }
}
