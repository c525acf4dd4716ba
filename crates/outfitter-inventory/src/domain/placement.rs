//! Where an incoming item lands in an inventory.

use outfitter_core::item::{ClothingCategory, Item};

/// Slot index reserved for head items in a clothing inventory.
pub const HEAD_SLOT_INDEX: usize = 0;
/// Slot index reserved for body items in a clothing inventory.
pub const BODY_SLOT_INDEX: usize = 1;

/// Per-inventory rule deciding which slot an item may occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementPolicy {
    /// Any item may occupy any slot.
    FreePlacement,
    /// Each item belongs to exactly one slot, chosen by its clothing
    /// category. Every category other than `Head` routes to the body slot.
    CategoryRouted {
        /// Slot for `Head` items.
        head_slot: usize,
        /// Slot for every other category.
        body_slot: usize,
    },
}

impl PlacementPolicy {
    /// Policy of a clothing inventory.
    pub const CLOTHING: Self = Self::CategoryRouted {
        head_slot: HEAD_SLOT_INDEX,
        body_slot: BODY_SLOT_INDEX,
    };

    /// The only slot a category may occupy, or `None` if placement is free.
    #[must_use]
    pub fn routed_slot(self, category: ClothingCategory) -> Option<usize> {
        match self {
            Self::FreePlacement => None,
            Self::CategoryRouted {
                head_slot,
                body_slot,
            } => Some(if category == ClothingCategory::Head {
                head_slot
            } else {
                body_slot
            }),
        }
    }

    /// Whether an item of `category` may sit at `index`.
    #[must_use]
    pub fn accepts(self, category: ClothingCategory, index: usize) -> bool {
        self.routed_slot(category).is_none_or(|slot| slot == index)
    }

    /// Count assumed for an item that has never been saved in this inventory.
    #[must_use]
    pub fn default_count(self, item: &Item) -> u32 {
        match self {
            Self::FreePlacement => item.starting_amount,
            Self::CategoryRouted { .. } => 0,
        }
    }
}
