//! Aggregate root for the Inventory context.

use std::sync::Arc;

use outfitter_core::catalog::ItemCatalog;
use outfitter_core::error::DomainError;
use outfitter_core::item::{ItemId, ItemPair};
use outfitter_core::persistence::CountStore;
use tracing::debug;
use uuid::Uuid;

use super::events::{CountChanged, InventoryEvent, SlotUpdated};
use super::placement::{BODY_SLOT_INDEX, HEAD_SLOT_INDEX, PlacementPolicy};
use super::slot::Slot;

/// An ordered, fixed-size sequence of slots drawing from an item catalog.
///
/// Every slot mutation records an `InventoryEvent`; the owner drains them
/// and forwards display refreshes to the UI collaborator.
#[derive(Debug)]
pub struct Inventory {
    /// Inventory identifier.
    pub id: Uuid,
    /// Namespace of the persisted counts owned by this inventory.
    save_key: String,
    /// Catalog the inventory draws item definitions from.
    catalog: Arc<ItemCatalog>,
    /// Rule deciding where incoming items land.
    policy: PlacementPolicy,
    /// Slots in index order; the length never changes.
    slots: Vec<Slot>,
    /// Notifications not yet drained.
    uncommitted_events: Vec<InventoryEvent>,
}

impl Inventory {
    /// Creates a general inventory with one slot per catalog item.
    ///
    /// Slot `i` starts with catalog item `i` when its persisted count (the
    /// item's starting amount if nothing was saved) is non-zero.
    #[must_use]
    pub fn general(
        id: Uuid,
        save_key: impl Into<String>,
        catalog: Arc<ItemCatalog>,
        store: &dyn CountStore,
    ) -> Self {
        let save_key = save_key.into();
        let policy = PlacementPolicy::FreePlacement;
        let slots = catalog
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let amount = store.get_count(&item.id, &save_key, policy.default_count(item));
                let pair = ItemPair::new(item.id.clone(), amount);
                Slot::new(index, &save_key, Some(pair), Some(index))
            })
            .collect();
        Self::with_slots(id, save_key, catalog, policy, slots)
    }

    /// Creates a clothing inventory with a head slot and a body slot.
    ///
    /// Each slot starts with the first catalog item of its category that has
    /// a non-zero persisted count.
    #[must_use]
    pub fn clothing(
        id: Uuid,
        save_key: impl Into<String>,
        catalog: Arc<ItemCatalog>,
        store: &dyn CountStore,
    ) -> Self {
        let save_key = save_key.into();
        let policy = PlacementPolicy::CLOTHING;
        let mut slots = vec![
            Slot::empty(HEAD_SLOT_INDEX, &save_key),
            Slot::empty(BODY_SLOT_INDEX, &save_key),
        ];
        for (position, item) in catalog.iter().enumerate() {
            let amount = store.get_count(&item.id, &save_key, policy.default_count(item));
            if amount == 0 {
                continue;
            }
            if let Some(index) = policy.routed_slot(item.category) {
                if slots[index].is_empty() {
                    let pair = ItemPair::new(item.id.clone(), amount);
                    slots[index] = slots[index].with_pair(Some(pair), Some(position));
                }
            }
        }
        Self::with_slots(id, save_key, catalog, policy, slots)
    }

    /// Creates a display-only inventory listing `items`, one unit per slot.
    ///
    /// Nothing about a listing is persisted; it backs the slots a shop shows.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownItem` if an item is not in the catalog.
    pub fn listing(
        id: Uuid,
        save_key: impl Into<String>,
        catalog: Arc<ItemCatalog>,
        items: &[ItemId],
    ) -> Result<Self, DomainError> {
        let save_key = save_key.into();
        let mut slots = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            catalog.require(item)?;
            let pair = ItemPair::new(item.clone(), 1);
            slots.push(Slot::new(index, &save_key, Some(pair), catalog.position(item)));
        }
        Ok(Self::with_slots(
            id,
            save_key,
            catalog,
            PlacementPolicy::FreePlacement,
            slots,
        ))
    }

    fn with_slots(
        id: Uuid,
        save_key: String,
        catalog: Arc<ItemCatalog>,
        policy: PlacementPolicy,
        slots: Vec<Slot>,
    ) -> Self {
        Self {
            id,
            save_key,
            catalog,
            policy,
            slots,
            uncommitted_events: Vec::new(),
        }
    }

    /// Namespace of the persisted counts owned by this inventory.
    #[must_use]
    pub fn save_key(&self) -> &str {
        &self.save_key
    }

    /// The placement rule of this inventory.
    #[must_use]
    pub fn policy(&self) -> PlacementPolicy {
        self.policy
    }

    /// Returns `true` for category-routed (clothing) inventories.
    #[must_use]
    pub fn is_clothing(&self) -> bool {
        matches!(self.policy, PlacementPolicy::CategoryRouted { .. })
    }

    /// The catalog this inventory draws from.
    #[must_use]
    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    /// All slots in index order.
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the inventory has no slots at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the slot at `index`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::OutOfRange` if `index` is not a slot.
    pub fn slot(&self, index: usize) -> Result<&Slot, DomainError> {
        self.slots.get(index).ok_or(DomainError::OutOfRange {
            index,
            len: self.slots.len(),
        })
    }

    /// Index of the slot currently holding `item`.
    #[must_use]
    pub fn find_item(&self, item: &ItemId) -> Option<usize> {
        self.slots.iter().position(|slot| slot.item() == Some(item))
    }

    /// Reads the persisted count of `item` in this inventory.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownItem` if the item is not in the catalog.
    pub fn count_of(&self, item: &ItemId, store: &dyn CountStore) -> Result<u32, DomainError> {
        let definition = self.catalog.require(item)?;
        Ok(store.get_count(item, &self.save_key, self.policy.default_count(definition)))
    }

    /// Whether `item` may be placed at `slot_index`.
    ///
    /// For a clothing inventory this is true iff the item's category owns the
    /// slot (`Head` owns slot 0, every other category slot 1). Unknown items
    /// and out-of-range indices are never valid.
    #[must_use]
    pub fn check_if_switch_is_valid(&self, item: &ItemId, slot_index: usize) -> bool {
        if slot_index >= self.slots.len() {
            return false;
        }
        self.catalog
            .get(item)
            .is_some_and(|definition| self.policy.accepts(definition.category, slot_index))
    }

    /// Decides which slot `item` would occupy if it were deposited now.
    ///
    /// A slot already holding the item wins, then `preferred` if it is
    /// empty, then the first empty slot. Clothing inventories ignore
    /// `preferred` and route by category.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownItem` for items missing from the catalog,
    /// `DomainError::OutOfRange` for a bad `preferred` index and
    /// `DomainError::Validation` when no slot can take the item.
    pub fn placement_for(
        &self,
        item: &ItemId,
        preferred: Option<usize>,
    ) -> Result<usize, DomainError> {
        let definition = self.catalog.require(item)?;
        if let Some(index) = self.policy.routed_slot(definition.category) {
            self.slot(index)?;
            return Ok(index);
        }
        if let Some(index) = self.find_item(item) {
            return Ok(index);
        }
        if let Some(index) = preferred {
            if self.slot(index)?.is_empty() {
                return Ok(index);
            }
        }
        self.slots.iter().position(Slot::is_empty).ok_or_else(|| {
            DomainError::Validation(format!(
                "inventory {} has no free slot for {item}",
                self.id
            ))
        })
    }

    /// Replaces the contents of a slot and records a display refresh.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::OutOfRange` if `index` is not a slot.
    pub fn set_slot(&mut self, index: usize, pair: Option<ItemPair>) -> Result<(), DomainError> {
        let current = self.slot(index)?;
        let storage_index = pair
            .as_ref()
            .and_then(|pair| self.catalog.position(&pair.item));
        let updated = current.with_pair(pair, storage_index);
        debug!(
            inventory_id = %self.id,
            slot_index = index,
            item = ?updated.item(),
            amount = updated.amount(),
            "Slot updated"
        );
        self.uncommitted_events.push(InventoryEvent::SlotUpdated(SlotUpdated {
            inventory_id: self.id,
            slot_index: index,
            pair: updated.pair().cloned(),
            save_key: updated.save_key().to_owned(),
        }));
        self.slots[index] = updated;
        Ok(())
    }

    /// Exchanges the contents of two slots.
    ///
    /// Swapping a slot with itself changes nothing. In a clothing inventory
    /// both stacks must be accepted at their new positions.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::OutOfRange` if either index is not a slot and
    /// `DomainError::InvalidExchange` if the placement rule forbids the swap.
    /// Nothing is mutated on error.
    pub fn try_switch_slots(&mut self, index_a: usize, index_b: usize) -> Result<(), DomainError> {
        let pair_a = self.slot(index_a)?.pair().cloned();
        let pair_b = self.slot(index_b)?.pair().cloned();
        if index_a == index_b {
            return Ok(());
        }
        for (pair, destination) in [(&pair_a, index_b), (&pair_b, index_a)] {
            if let Some(pair) = pair {
                if !self.check_if_switch_is_valid(&pair.item, destination) {
                    return Err(DomainError::InvalidExchange(format!(
                        "{} cannot occupy slot {destination} of inventory {}",
                        pair.item, self.id
                    )));
                }
            }
        }
        self.set_slot(index_a, pair_b)?;
        self.set_slot(index_b, pair_a)?;
        Ok(())
    }

    /// Adds `amount` to the persisted count of `item` and places the stack.
    ///
    /// General inventories refresh the slot already holding the item or take
    /// the first empty slot. Clothing inventories always overwrite the slot
    /// owned by the item's category, since gaining clothing means wearing it.
    /// Returns the slot index the item now occupies.
    ///
    /// # Errors
    ///
    /// See [`Inventory::placement_for`]; nothing is mutated on error.
    pub fn gain_item_amount(
        &mut self,
        item: &ItemId,
        amount: u32,
        store: &mut dyn CountStore,
    ) -> Result<usize, DomainError> {
        self.deposit(item, amount, None, store)
    }

    /// Adds `amount` of `item`, preferring `preferred` when the item is not
    /// already held. Used for stacks arriving from another inventory.
    ///
    /// # Errors
    ///
    /// See [`Inventory::placement_for`]; nothing is mutated on error.
    pub fn deposit(
        &mut self,
        item: &ItemId,
        amount: u32,
        preferred: Option<usize>,
        store: &mut dyn CountStore,
    ) -> Result<usize, DomainError> {
        let index = self.placement_for(item, preferred)?;
        let previous = self.count_of(item, store)?;
        let current = previous.saturating_add(amount);
        self.write_count(item, previous, current, store);
        self.set_slot(index, Some(ItemPair::new(item.clone(), current)))?;
        Ok(index)
    }

    /// Subtracts up to `amount` from the persisted count of `item`.
    ///
    /// The slot holding the item, if any, is refreshed and becomes empty
    /// once the count reaches zero. Returns the new count.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownItem` if the item is not in the catalog.
    pub fn lose_item_amount(
        &mut self,
        item: &ItemId,
        amount: u32,
        store: &mut dyn CountStore,
    ) -> Result<u32, DomainError> {
        let previous = self.count_of(item, store)?;
        let current = previous.saturating_sub(amount);
        self.write_count(item, previous, current, store);
        if let Some(index) = self.find_item(item) {
            self.set_slot(index, Some(ItemPair::new(item.clone(), current)))?;
        }
        Ok(current)
    }

    /// Empties a slot and zeroes the persisted count of its stack.
    ///
    /// Returns the stack that was removed, `None` if the slot was empty.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::OutOfRange` if `index` is not a slot.
    pub fn withdraw(
        &mut self,
        index: usize,
        store: &mut dyn CountStore,
    ) -> Result<Option<ItemPair>, DomainError> {
        let Some(pair) = self.slot(index)?.pair().cloned() else {
            return Ok(None);
        };
        self.write_count(&pair.item, pair.amount, 0, store);
        self.set_slot(index, None)?;
        Ok(Some(pair))
    }

    fn write_count(
        &mut self,
        item: &ItemId,
        previous: u32,
        current: u32,
        store: &mut dyn CountStore,
    ) {
        store.set_count(item, &self.save_key, current);
        debug!(
            inventory_id = %self.id,
            item = %item,
            previous,
            current,
            "Count written"
        );
        self.uncommitted_events.push(InventoryEvent::CountChanged(CountChanged {
            inventory_id: self.id,
            item: item.clone(),
            save_key: self.save_key.clone(),
            previous,
            current,
        }));
    }

    /// Returns notifications recorded since the last drain.
    #[must_use]
    pub fn uncommitted_events(&self) -> &[InventoryEvent] {
        &self.uncommitted_events
    }

    /// Removes and returns notifications recorded since the last drain.
    pub fn take_uncommitted_events(&mut self) -> Vec<InventoryEvent> {
        std::mem::take(&mut self.uncommitted_events)
    }
}
