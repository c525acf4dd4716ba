//! Slot exchange protocol between two registered inventories.
//!
//! A drop from slot A onto slot B resolves to exactly one of three shapes,
//! checked in order:
//!
//! 1. same inventory, not clothing: a plain slot swap;
//! 2. general inventory into the clothing inventory;
//! 3. clothing inventory into a general inventory.
//!
//! Anything else is an `InvalidExchange`. Every check runs before the first
//! mutation, and stacks always move whole.

use outfitter_core::error::DomainError;
use outfitter_core::item::ItemPair;
use outfitter_core::persistence::CountStore;
use outfitter_inventory::application::command_handlers::handle_switch_slots;
use outfitter_inventory::domain::aggregates::Inventory;
use outfitter_inventory::domain::commands::SwitchSlots;
use outfitter_inventory::domain::events::InventoryEvent;
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::aggregates::Session;
use crate::domain::commands::{ExchangeSlots, SlotRef};

/// The shape an exchange resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExchangeKind {
    /// Two slots of one general inventory swapped.
    SameInventory,
    /// A general stack moved into the clothing inventory.
    IntoClothing,
    /// A clothing stack moved into a general inventory.
    OutOfClothing,
}

/// Result of a successful exchange.
#[derive(Debug)]
pub struct ExchangeReceipt {
    /// The shape the exchange resolved to.
    pub kind: ExchangeKind,
    /// Slot the drag started from.
    pub source: SlotRef,
    /// Slot the stack was dropped on.
    pub destination: SlotRef,
    /// Notifications of both inventories, in order.
    pub events: Vec<InventoryEvent>,
}

fn invalid(reason: impl Into<String>) -> DomainError {
    DomainError::InvalidExchange(reason.into())
}

/// Whether `id` is the active clothing inventory. Any other category-routed
/// inventory takes part in no exchange.
fn is_active_clothing(session: &Session, id: Uuid) -> Result<bool, DomainError> {
    let is_clothing = session.inventory(id)?.is_clothing();
    if is_clothing && session.clothing_inventory_id() != Some(id) {
        return Err(invalid(format!(
            "inventory {id} is not the active clothing inventory"
        )));
    }
    Ok(is_clothing)
}

/// Moves the stack at `command.source` onto `command.destination`.
///
/// # Errors
///
/// Returns `DomainError::InventoryNotFound` or `DomainError::OutOfRange` for
/// a bad endpoint and `DomainError::InvalidExchange` when a shop is open,
/// the source is empty or the move is not allowed. Nothing is mutated on
/// error.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id, source = %command.source, destination = %command.destination))]
pub fn try_exchange(
    command: &ExchangeSlots,
    session: &mut Session,
    store: &mut dyn CountStore,
) -> Result<ExchangeReceipt, DomainError> {
    if session.is_shop_active() {
        return Err(invalid("slot exchange is disabled while a shop is open"));
    }
    let (source, destination) = (command.source, command.destination);
    let moving = session
        .slot(source)?
        .pair()
        .cloned()
        .ok_or_else(|| invalid(format!("slot {source} is empty")))?;
    session.slot(destination)?;

    let source_is_clothing = is_active_clothing(session, source.inventory)?;
    let destination_is_clothing = is_active_clothing(session, destination.inventory)?;

    let (kind, events) = match (source_is_clothing, destination_is_clothing) {
        (false, false) if source.inventory == destination.inventory => {
            let switch = SwitchSlots {
                correlation_id: command.correlation_id,
                inventory_id: source.inventory,
                slot_a: source.slot,
                slot_b: destination.slot,
            };
            let result = handle_switch_slots(&switch, session.inventory_mut(source.inventory)?)?;
            (ExchangeKind::SameInventory, result.events)
        }
        (false, true) => {
            let (general, clothing) =
                session.inventory_pair_mut(source.inventory, destination.inventory)?;
            let events =
                into_clothing(&moving, general, source.slot, clothing, destination.slot, store)?;
            (ExchangeKind::IntoClothing, events)
        }
        (true, false) => {
            let (clothing, general) =
                session.inventory_pair_mut(source.inventory, destination.inventory)?;
            let events =
                out_of_clothing(&moving, clothing, source.slot, general, destination.slot, store)?;
            (ExchangeKind::OutOfClothing, events)
        }
        _ => {
            return Err(invalid(format!(
                "no exchange from {source} to {destination}"
            )));
        }
    };

    info!(kind = ?kind, item = %moving.item, amount = moving.amount, "Exchange completed");
    Ok(ExchangeReceipt {
        kind,
        source,
        destination,
        events,
    })
}

/// Wears `moving` and hands the displaced clothing back to the general slot
/// it came from.
fn into_clothing(
    moving: &ItemPair,
    general: &mut Inventory,
    source_slot: usize,
    clothing: &mut Inventory,
    destination_slot: usize,
    store: &mut dyn CountStore,
) -> Result<Vec<InventoryEvent>, DomainError> {
    if !clothing.check_if_switch_is_valid(&moving.item, destination_slot) {
        return Err(invalid(format!(
            "{} cannot be worn in clothing slot {destination_slot}",
            moving.item
        )));
    }

    general.withdraw(source_slot, store)?;
    let displaced = clothing.withdraw(destination_slot, store)?;
    clothing.deposit(&moving.item, moving.amount, Some(destination_slot), store)?;
    if let Some(displaced) = displaced {
        general.deposit(&displaced.item, displaced.amount, Some(source_slot), store)?;
    }
    Ok(drain_both(general, clothing))
}

/// Takes `moving` off and drops it on the general slot. If that slot holds
/// clothing which fits the slot being vacated, the two are traded.
fn out_of_clothing(
    moving: &ItemPair,
    clothing: &mut Inventory,
    source_slot: usize,
    general: &mut Inventory,
    destination_slot: usize,
    store: &mut dyn CountStore,
) -> Result<Vec<InventoryEvent>, DomainError> {
    let traded = general
        .slot(destination_slot)?
        .pair()
        .filter(|pair| {
            pair.item != moving.item && clothing.check_if_switch_is_valid(&pair.item, source_slot)
        })
        .cloned();

    if let Some(traded) = traded {
        clothing.withdraw(source_slot, store)?;
        general.withdraw(destination_slot, store)?;
        clothing.deposit(&traded.item, traded.amount, Some(source_slot), store)?;
        general.deposit(&moving.item, moving.amount, Some(destination_slot), store)?;
    } else {
        general
            .placement_for(&moving.item, Some(destination_slot))
            .map_err(|e| match e {
                DomainError::Validation(reason) => DomainError::InvalidExchange(reason),
                other => other,
            })?;
        clothing.withdraw(source_slot, store)?;
        general.deposit(&moving.item, moving.amount, Some(destination_slot), store)?;
    }
    Ok(drain_both(clothing, general))
}

fn drain_both(first: &mut Inventory, second: &mut Inventory) -> Vec<InventoryEvent> {
    let mut events = first.take_uncommitted_events();
    events.extend(second.take_uncommitted_events());
    events
}

#[cfg(test)]
mod tests {
    use outfitter_core::error::DomainError;
    use outfitter_core::item::{ItemId, ItemPair};
    use outfitter_core::observer::NullObserver;
    use outfitter_core::persistence::{CountStore, MemoryCountStore};
    use outfitter_inventory::domain::aggregates::Inventory;
    use outfitter_test_support::{RecordingCountStore, items, sample_catalog};
    use uuid::Uuid;

    use super::{ExchangeKind, try_exchange};
    use crate::domain::aggregates::Session;
    use crate::domain::commands::{ExchangeSlots, SlotRef};
    use crate::domain::shop::ShopCatalog;

    struct Fixture {
        session: Session,
        store: RecordingCountStore,
        player: Uuid,
        wardrobe: Uuid,
    }

    /// Player holds a straw hat, a linen shirt, apples and a torch; the
    /// wardrobe wears an iron helm and chainmail.
    fn fixture() -> Fixture {
        let mut store = RecordingCountStore::new();
        store.set_count(&items::straw_hat(), "player", 1);
        store.set_count(&items::linen_shirt(), "player", 2);
        store.set_count(&items::iron_helm(), "wardrobe", 1);
        store.set_count(&items::chainmail(), "wardrobe", 1);
        store.clear_writes();

        let mut session = Session::new(sample_catalog(), 0);
        let player = session
            .register_player_inventory(Inventory::general(
                Uuid::new_v4(),
                "player",
                sample_catalog(),
                &store,
            ))
            .unwrap();
        let wardrobe = session
            .register_clothing_inventory(Inventory::clothing(
                Uuid::new_v4(),
                "wardrobe",
                sample_catalog(),
                &store,
            ))
            .unwrap();
        Fixture {
            session,
            store,
            player,
            wardrobe,
        }
    }

    fn exchange(source: SlotRef, destination: SlotRef) -> ExchangeSlots {
        ExchangeSlots {
            correlation_id: Uuid::new_v4(),
            source,
            destination,
        }
    }

    fn pair_at(session: &Session, slot: SlotRef) -> Option<ItemPair> {
        session.slot(slot).unwrap().pair().cloned()
    }

    fn pair(item: ItemId, amount: u32) -> Option<ItemPair> {
        Some(ItemPair::new(item, amount))
    }

    #[test]
    fn test_same_inventory_exchange_swaps_slots() {
        // Arrange
        let mut f = fixture();
        let apples = SlotRef::new(f.player, 4);
        let torch = SlotRef::new(f.player, 5);

        // Act
        let receipt = try_exchange(&exchange(apples, torch), &mut f.session, &mut f.store).unwrap();

        // Assert
        assert_eq!(receipt.kind, ExchangeKind::SameInventory);
        assert_eq!(pair_at(&f.session, apples), pair(items::torch(), 1));
        assert_eq!(pair_at(&f.session, torch), pair(items::apple(), 3));
        assert!(f.store.writes().is_empty());
    }

    #[test]
    fn test_into_clothing_returns_displaced_item_to_source_slot() {
        // Arrange
        let mut f = fixture();
        let hat = SlotRef::new(f.player, 0);
        let head = SlotRef::new(f.wardrobe, 0);

        // Act
        let receipt = try_exchange(&exchange(hat, head), &mut f.session, &mut f.store).unwrap();

        // Assert
        assert_eq!(receipt.kind, ExchangeKind::IntoClothing);
        assert_eq!(pair_at(&f.session, head), pair(items::straw_hat(), 1));
        assert_eq!(pair_at(&f.session, hat), pair(items::iron_helm(), 1));
        assert_eq!(f.store.get_count(&items::straw_hat(), "wardrobe", 0), 1);
        assert_eq!(f.store.get_count(&items::straw_hat(), "player", 9), 0);
        assert_eq!(f.store.get_count(&items::iron_helm(), "player", 0), 1);
        assert_eq!(f.store.get_count(&items::iron_helm(), "wardrobe", 9), 0);
    }

    #[test]
    fn test_into_wrong_clothing_slot_is_rejected_without_mutation() {
        // Arrange
        let mut f = fixture();
        let hat = SlotRef::new(f.player, 0);
        let body = SlotRef::new(f.wardrobe, 1);

        // Act
        let result = try_exchange(&exchange(hat, body), &mut f.session, &mut f.store);

        // Assert
        assert!(matches!(result, Err(DomainError::InvalidExchange(_))));
        assert_eq!(pair_at(&f.session, hat), pair(items::straw_hat(), 1));
        assert_eq!(pair_at(&f.session, body), pair(items::chainmail(), 1));
        assert!(f.store.writes().is_empty());
    }

    #[test]
    fn test_out_of_clothing_into_empty_slot() {
        // Arrange
        let mut f = fixture();
        let head = SlotRef::new(f.wardrobe, 0);
        let empty = SlotRef::new(f.player, 1);

        // Act
        let receipt = try_exchange(&exchange(head, empty), &mut f.session, &mut f.store).unwrap();

        // Assert
        assert_eq!(receipt.kind, ExchangeKind::OutOfClothing);
        assert_eq!(pair_at(&f.session, head), None);
        assert_eq!(pair_at(&f.session, empty), pair(items::iron_helm(), 1));
        assert_eq!(f.store.get_count(&items::iron_helm(), "player", 0), 1);
    }

    #[test]
    fn test_out_of_clothing_trades_with_fitting_clothing() {
        // Arrange
        let mut f = fixture();
        let body = SlotRef::new(f.wardrobe, 1);
        let shirt = SlotRef::new(f.player, 2);

        // Act
        try_exchange(&exchange(body, shirt), &mut f.session, &mut f.store).unwrap();

        // Assert
        assert_eq!(pair_at(&f.session, body), pair(items::linen_shirt(), 2));
        assert_eq!(pair_at(&f.session, shirt), pair(items::chainmail(), 1));
    }

    #[test]
    fn test_out_of_clothing_onto_occupied_slot_takes_first_free_slot() {
        // Arrange
        let mut f = fixture();
        let head = SlotRef::new(f.wardrobe, 0);
        let apples = SlotRef::new(f.player, 4);

        // Act
        try_exchange(&exchange(head, apples), &mut f.session, &mut f.store).unwrap();

        // Assert
        assert_eq!(pair_at(&f.session, apples), pair(items::apple(), 3));
        assert_eq!(
            pair_at(&f.session, SlotRef::new(f.player, 1)),
            pair(items::iron_helm(), 1)
        );
        assert_eq!(pair_at(&f.session, head), None);
    }

    #[test]
    fn test_clothing_to_clothing_is_invalid() {
        let mut f = fixture();
        let head = SlotRef::new(f.wardrobe, 0);
        let body = SlotRef::new(f.wardrobe, 1);

        let result = try_exchange(&exchange(head, body), &mut f.session, &mut f.store);

        assert!(matches!(result, Err(DomainError::InvalidExchange(_))));
        assert!(f.store.writes().is_empty());
    }

    #[test]
    fn test_replaced_clothing_inventory_takes_no_exchange() {
        // Arrange
        let mut f = fixture();
        let spare = Inventory::clothing(Uuid::new_v4(), "wardrobe.alt", sample_catalog(), &f.store);
        f.session.register_clothing_inventory(spare).unwrap();

        // Act
        let result = try_exchange(
            &exchange(SlotRef::new(f.player, 0), SlotRef::new(f.wardrobe, 0)),
            &mut f.session,
            &mut f.store,
        );

        // Assert
        assert_eq!(result.unwrap_err(), DomainError::InventoryNotFound(f.wardrobe));
        assert_eq!(f.session.inventories().len(), 2);
        assert_eq!(
            pair_at(&f.session, SlotRef::new(f.player, 0)),
            pair(items::straw_hat(), 1)
        );
        assert!(f.store.writes().is_empty());
    }

    #[test]
    fn test_inactive_clothing_inventory_is_invalid() {
        // Arrange
        let mut f = fixture();
        f.store.set_count(&items::straw_hat(), "wardrobe.alt", 1);
        f.store.clear_writes();
        let spare_id = f.session.register_inventory(Inventory::clothing(
            Uuid::new_v4(),
            "wardrobe.alt",
            sample_catalog(),
            &f.store,
        ));

        // Act
        let into_spare = try_exchange(
            &exchange(SlotRef::new(f.player, 0), SlotRef::new(spare_id, 0)),
            &mut f.session,
            &mut f.store,
        );
        let out_of_spare = try_exchange(
            &exchange(SlotRef::new(spare_id, 0), SlotRef::new(f.player, 1)),
            &mut f.session,
            &mut f.store,
        );

        // Assert
        assert!(matches!(into_spare, Err(DomainError::InvalidExchange(_))));
        assert!(matches!(out_of_spare, Err(DomainError::InvalidExchange(_))));
        assert_eq!(
            pair_at(&f.session, SlotRef::new(f.player, 0)),
            pair(items::straw_hat(), 1)
        );
        assert!(f.store.writes().is_empty());
    }

    #[test]
    fn test_empty_source_is_invalid() {
        let mut f = fixture();
        let empty = SlotRef::new(f.player, 1);

        let result = try_exchange(
            &exchange(empty, SlotRef::new(f.player, 4)),
            &mut f.session,
            &mut f.store,
        );

        assert!(matches!(result, Err(DomainError::InvalidExchange(_))));
    }

    #[test]
    fn test_out_of_range_destination_fails_fast() {
        let mut f = fixture();

        let result = try_exchange(
            &exchange(SlotRef::new(f.player, 4), SlotRef::new(f.wardrobe, 2)),
            &mut f.session,
            &mut f.store,
        );

        assert_eq!(result.unwrap_err(), DomainError::OutOfRange { index: 2, len: 2 });
        assert!(f.store.writes().is_empty());
    }

    #[test]
    fn test_exchange_is_disabled_while_shop_is_open() {
        // Arrange
        let mut f = fixture();
        let shop = ShopCatalog {
            id: "empty".to_owned(),
            display_name: "Empty Shelves".to_owned(),
            entries: Vec::new(),
        };
        f.session
            .register_active_shop_inventory(shop, &mut NullObserver)
            .unwrap();

        // Act
        let result = try_exchange(
            &exchange(SlotRef::new(f.player, 4), SlotRef::new(f.player, 5)),
            &mut f.session,
            &mut f.store,
        );

        // Assert
        assert!(matches!(result, Err(DomainError::InvalidExchange(_))));
        assert_eq!(
            pair_at(&f.session, SlotRef::new(f.player, 4)),
            pair(items::apple(), 3)
        );
    }

    #[test]
    fn test_unregistered_inventory_is_not_found() {
        let mut f = fixture();
        let stranger = Uuid::new_v4();
        let mut store = MemoryCountStore::new();

        let result = try_exchange(
            &exchange(SlotRef::new(f.player, 4), SlotRef::new(stranger, 0)),
            &mut f.session,
            &mut store,
        );

        assert_eq!(result.unwrap_err(), DomainError::InventoryNotFound(stranger));
    }
}
