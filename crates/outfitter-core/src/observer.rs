//! Contract of the UI collaborator that displays inventory slots.
//!
//! The core calls into an observer after it mutates a slot or when shop
//! pricing may have changed. It never reads anything back.

use serde::Serialize;
use uuid::Uuid;

use crate::item::ItemPair;

/// Shop-mode pricing state of a single slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Availability {
    /// No shop is open, or the slot is empty.
    NotShopping,
    /// The active shop does not price this item.
    Unavailable,
    /// The active shop prices this item.
    Priced {
        /// Buy price on shop slots, sell price on every other slot.
        price: u32,
        /// Whether the current balance covers the price.
        affordable: bool,
    },
}

/// Receives display refreshes for inventory slots.
pub trait SlotObserver {
    /// A slot's contents changed; `pair` is `None` for an empty slot.
    fn update_info(
        &mut self,
        inventory: Uuid,
        pair: Option<&ItemPair>,
        save_key: &str,
        slot_index: usize,
    );

    /// The shop-mode pricing of a slot may have changed.
    fn update_availability(
        &mut self,
        inventory: Uuid,
        slot_index: usize,
        availability: Availability,
    );
}

/// An observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl SlotObserver for NullObserver {
    fn update_info(&mut self, _: Uuid, _: Option<&ItemPair>, _: &str, _: usize) {}

    fn update_availability(&mut self, _: Uuid, _: usize, _: Availability) {}
}
