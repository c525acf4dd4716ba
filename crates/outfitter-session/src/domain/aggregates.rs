//! Session state owned by the coordinating component.

use std::sync::Arc;

use outfitter_core::catalog::ItemCatalog;
use outfitter_core::error::DomainError;
use outfitter_core::item::ItemId;
use outfitter_core::observer::{Availability, SlotObserver};
use outfitter_inventory::domain::aggregates::Inventory;
use outfitter_inventory::domain::events::InventoryEvent;
use outfitter_inventory::domain::slot::Slot;
use tracing::{info, warn};
use uuid::Uuid;

use super::commands::SlotRef;
use super::shop::{ShopCatalog, ShopEntry};

/// The shop currently open, with the inventory listing its wares.
#[derive(Debug)]
struct ActiveShop {
    catalog: ShopCatalog,
    listing_id: Uuid,
}

/// Session-wide state: registered inventories, balance, active shop and
/// the drag in progress.
///
/// Shop mode is the presence of an active shop. While it is active slot
/// exchange is disabled and clicks buy or sell instead.
#[derive(Debug)]
pub struct Session {
    item_catalog: Arc<ItemCatalog>,
    /// Registered inventories in registration order.
    inventories: Vec<Inventory>,
    /// Inventory credited by purchases.
    player: Option<Uuid>,
    /// The single active clothing inventory; the last registration wins.
    clothing: Option<Uuid>,
    shop: Option<ActiveShop>,
    coins: u32,
    dragging: Option<SlotRef>,
}

impl Session {
    /// Creates a session with no inventories and `coins` in the balance.
    #[must_use]
    pub fn new(item_catalog: Arc<ItemCatalog>, coins: u32) -> Self {
        Self {
            item_catalog,
            inventories: Vec::new(),
            player: None,
            clothing: None,
            shop: None,
            coins,
            dragging: None,
        }
    }

    /// The item catalog every inventory of this session draws from.
    #[must_use]
    pub fn item_catalog(&self) -> &Arc<ItemCatalog> {
        &self.item_catalog
    }

    /// Current balance.
    #[must_use]
    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub(crate) fn debit(&mut self, amount: u32) {
        self.coins -= amount.min(self.coins);
    }

    pub(crate) fn credit(&mut self, amount: u32) {
        self.coins = self.coins.saturating_add(amount);
    }

    /// Registers an activated inventory, replacing one with the same id.
    /// Returns its id.
    pub fn register_inventory(&mut self, inventory: Inventory) -> Uuid {
        let id = inventory.id;
        match self.position(id) {
            Some(position) => self.inventories[position] = inventory,
            None => self.inventories.push(inventory),
        }
        info!(inventory_id = %id, "Inventory registered");
        id
    }

    /// Registers the general inventory that purchases are credited to.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for a clothing inventory.
    pub fn register_player_inventory(&mut self, inventory: Inventory) -> Result<Uuid, DomainError> {
        if inventory.is_clothing() {
            return Err(DomainError::Validation(format!(
                "clothing inventory {} cannot be the player inventory",
                inventory.id
            )));
        }
        let id = self.register_inventory(inventory);
        self.player = Some(id);
        Ok(id)
    }

    /// Registers the active clothing inventory. Only one exists at a time:
    /// the previous clothing inventory, if any, is unregistered first.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the inventory is not
    /// category-routed.
    pub fn register_clothing_inventory(
        &mut self,
        inventory: Inventory,
    ) -> Result<Uuid, DomainError> {
        if !inventory.is_clothing() {
            return Err(DomainError::Validation(format!(
                "inventory {} is not a clothing inventory",
                inventory.id
            )));
        }
        if let Some(previous) = self.clothing.filter(|previous| *previous != inventory.id) {
            warn!(
                previous = %previous,
                current = %inventory.id,
                "Replacing active clothing inventory"
            );
            self.unregister_inventory(previous);
        }
        let id = self.register_inventory(inventory);
        self.clothing = Some(id);
        Ok(id)
    }

    /// Deregisters a deactivated inventory and hands it back.
    pub fn unregister_inventory(&mut self, id: Uuid) -> Option<Inventory> {
        let position = self.position(id)?;
        if self.player == Some(id) {
            self.player = None;
        }
        if self.clothing == Some(id) {
            self.clothing = None;
        }
        if self.dragging.is_some_and(|slot| slot.inventory == id) {
            self.dragging = None;
        }
        info!(inventory_id = %id, "Inventory unregistered");
        Some(self.inventories.remove(position))
    }

    /// Id of the inventory credited by purchases.
    #[must_use]
    pub fn player_inventory_id(&self) -> Option<Uuid> {
        self.player
    }

    /// Id of the active clothing inventory.
    #[must_use]
    pub fn clothing_inventory_id(&self) -> Option<Uuid> {
        self.clothing
    }

    /// Registered inventories in registration order.
    #[must_use]
    pub fn inventories(&self) -> &[Inventory] {
        &self.inventories
    }

    fn position(&self, id: Uuid) -> Option<usize> {
        self.inventories.iter().position(|inventory| inventory.id == id)
    }

    /// Looks up a registered inventory.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InventoryNotFound` if it is not registered.
    pub fn inventory(&self, id: Uuid) -> Result<&Inventory, DomainError> {
        self.position(id)
            .map(|position| &self.inventories[position])
            .ok_or(DomainError::InventoryNotFound(id))
    }

    /// Looks up a registered inventory for mutation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InventoryNotFound` if it is not registered.
    pub fn inventory_mut(&mut self, id: Uuid) -> Result<&mut Inventory, DomainError> {
        let position = self.position(id).ok_or(DomainError::InventoryNotFound(id))?;
        Ok(&mut self.inventories[position])
    }

    /// Borrows two distinct registered inventories for mutation at once.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InventoryNotFound` if either is not registered
    /// and `DomainError::Validation` if both ids are the same.
    pub fn inventory_pair_mut(
        &mut self,
        first: Uuid,
        second: Uuid,
    ) -> Result<(&mut Inventory, &mut Inventory), DomainError> {
        let a = self.position(first).ok_or(DomainError::InventoryNotFound(first))?;
        let b = self
            .position(second)
            .ok_or(DomainError::InventoryNotFound(second))?;
        if a == b {
            return Err(DomainError::Validation(format!(
                "inventory {first} cannot be borrowed twice"
            )));
        }
        if a < b {
            let (left, right) = self.inventories.split_at_mut(b);
            Ok((&mut left[a], &mut right[0]))
        } else {
            let (left, right) = self.inventories.split_at_mut(a);
            Ok((&mut right[0], &mut left[b]))
        }
    }

    /// Looks up the slot addressed by `slot`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InventoryNotFound` or `DomainError::OutOfRange`.
    pub fn slot(&self, slot: SlotRef) -> Result<&Slot, DomainError> {
        self.inventory(slot.inventory)?.slot(slot.slot)
    }

    /// Opens a shop: registers its catalog and a listing inventory showing
    /// its wares, then reports the availability of every slot to
    /// `observer`. An already open shop is closed first. Returns the listing
    /// inventory id.
    ///
    /// # Errors
    ///
    /// Returns the catalog's validation error; the session is unchanged.
    pub fn register_active_shop_inventory(
        &mut self,
        catalog: ShopCatalog,
        observer: &mut dyn SlotObserver,
    ) -> Result<Uuid, DomainError> {
        catalog.validate(&self.item_catalog)?;
        let listing = Inventory::listing(
            Uuid::new_v4(),
            format!("shop.{}", catalog.id),
            Arc::clone(&self.item_catalog),
            &catalog.items(),
        )?;
        self.close_shop();

        let listing_id = self.register_inventory(listing);
        self.dragging = None;
        info!(shop_id = %catalog.id, listing_id = %listing_id, "Shop opened");
        self.shop = Some(ActiveShop {
            catalog,
            listing_id,
        });
        self.refresh_availability(observer);
        Ok(listing_id)
    }

    /// Closes the active shop, if any, and returns its catalog. Every
    /// remaining slot is reported to `observer` as not shopping.
    pub fn unregister_active_shop_inventory(
        &mut self,
        observer: &mut dyn SlotObserver,
    ) -> Option<ShopCatalog> {
        let closed = self.close_shop()?;
        self.refresh_availability(observer);
        Some(closed)
    }

    fn close_shop(&mut self) -> Option<ShopCatalog> {
        let shop = self.shop.take()?;
        self.unregister_inventory(shop.listing_id);
        info!(shop_id = %shop.catalog.id, "Shop closed");
        Some(shop.catalog)
    }

    /// Returns `true` while a shop is open.
    #[must_use]
    pub fn is_shop_active(&self) -> bool {
        self.shop.is_some()
    }

    /// Catalog of the open shop.
    #[must_use]
    pub fn active_shop(&self) -> Option<&ShopCatalog> {
        self.shop.as_ref().map(|shop| &shop.catalog)
    }

    /// Id of the inventory listing the open shop's wares.
    #[must_use]
    pub fn shop_listing_id(&self) -> Option<Uuid> {
        self.shop.as_ref().map(|shop| shop.listing_id)
    }

    /// Price entry of `item` in the open shop.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotInCatalog` if no shop is open or the open
    /// shop does not price the item.
    pub fn price_of(&self, item: &ItemId) -> Result<&ShopEntry, DomainError> {
        self.active_shop()
            .and_then(|catalog| catalog.entry(item))
            .ok_or_else(|| DomainError::NotInCatalog(item.clone()))
    }

    pub(crate) fn begin_drag(&mut self, source: SlotRef) {
        self.dragging = Some(source);
    }

    /// Ends the drag in progress, returning the slot it started from.
    pub fn take_drag(&mut self) -> Option<SlotRef> {
        self.dragging.take()
    }

    /// The slot being dragged, if a drag is in progress.
    #[must_use]
    pub fn dragging(&self) -> Option<SlotRef> {
        self.dragging
    }

    /// Computes the shop-mode availability of a slot. Nothing is cached.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InventoryNotFound` or `DomainError::OutOfRange`.
    pub fn availability(&self, slot: SlotRef) -> Result<Availability, DomainError> {
        let inventory = self.inventory(slot.inventory)?;
        Ok(self.availability_of(inventory, inventory.slot(slot.slot)?))
    }

    fn availability_of(&self, inventory: &Inventory, slot: &Slot) -> Availability {
        let (Some(shop), Some(item)) = (&self.shop, slot.item()) else {
            return Availability::NotShopping;
        };
        match shop.catalog.entry(item) {
            None => Availability::Unavailable,
            Some(entry) if inventory.id == shop.listing_id => Availability::Priced {
                price: entry.buy_price,
                affordable: self.coins >= entry.buy_price,
            },
            Some(entry) => Availability::Priced {
                price: entry.sell_price,
                affordable: true,
            },
        }
    }

    /// Reports the availability of every registered slot to `observer`.
    pub fn refresh_availability(&self, observer: &mut dyn SlotObserver) {
        for inventory in &self.inventories {
            for slot in inventory.slots() {
                observer.update_availability(
                    inventory.id,
                    slot.index(),
                    self.availability_of(inventory, slot),
                );
            }
        }
    }
}

/// Forwards every `SlotUpdated` notification to the UI collaborator.
pub fn forward_slot_updates(events: &[InventoryEvent], observer: &mut dyn SlotObserver) {
    for event in events {
        if let InventoryEvent::SlotUpdated(update) = event {
            observer.update_info(
                update.inventory_id,
                update.pair.as_ref(),
                &update.save_key,
                update.slot_index,
            );
        }
    }
}
