//! Single entry point for input events.
//!
//! `dispatch` turns each event into an exchange, a purchase or a sale,
//! forwards the resulting slot refreshes to the UI collaborator and returns
//! a typed outcome. Rejections come back as `Err` and leave every
//! inventory, count and the balance untouched.

use outfitter_core::command::Command;
use outfitter_core::error::DomainError;
use outfitter_core::observer::SlotObserver;
use outfitter_core::persistence::CountStore;
use tracing::{debug, instrument, warn};

use crate::application::exchange::{ExchangeReceipt, try_exchange};
use crate::application::transactions::{TransactionReceipt, try_buy, try_sell};
use crate::domain::aggregates::{Session, forward_slot_updates};
use crate::domain::commands::{
    ActivateItem, BeginExchange, BuyItem, EndExchange, ExchangeSlots, InputEvent, SellItem,
    SlotRef,
};

/// What an accepted input event did.
#[derive(Debug)]
pub enum Outcome {
    /// A drag began on the given slot.
    DragStarted(SlotRef),
    /// A drag ended in a completed exchange.
    Exchanged(ExchangeReceipt),
    /// A click on a shop slot bought one unit.
    Bought(TransactionReceipt),
    /// A click on a player slot sold one unit.
    Sold(TransactionReceipt),
    /// The event had nothing to act on.
    Ignored,
}

/// Handles one input event.
///
/// # Errors
///
/// Returns the error kind describing why the event was rejected:
/// `InvalidExchange` for refused drags and drops, `NotInCatalog` and
/// `InsufficientFunds` for refused transactions, `OutOfRange` and
/// `InventoryNotFound` for events addressing slots that do not exist.
#[instrument(skip_all, fields(command_type = event.command().command_type(), correlation_id = %event.command().correlation_id()))]
pub fn dispatch(
    session: &mut Session,
    event: &InputEvent,
    store: &mut dyn CountStore,
    observer: &mut dyn SlotObserver,
) -> Result<Outcome, DomainError> {
    let result = match event {
        InputEvent::BeginExchange(command) => begin_exchange(command, session),
        InputEvent::EndExchange(command) => end_exchange(command, session, store, observer),
        InputEvent::ActivateItem(command) => activate_item(command, session, store, observer),
    };
    if let Err(error) = &result {
        warn!(error = %error, "Input event rejected");
    }
    result
}

fn begin_exchange(command: &BeginExchange, session: &mut Session) -> Result<Outcome, DomainError> {
    if session.is_shop_active() {
        return Err(DomainError::InvalidExchange(
            "dragging is disabled while a shop is open".to_owned(),
        ));
    }
    if session.slot(command.source)?.is_empty() {
        return Err(DomainError::InvalidExchange(format!(
            "slot {} is empty",
            command.source
        )));
    }
    session.begin_drag(command.source);
    debug!(source = %command.source, "Drag started");
    Ok(Outcome::DragStarted(command.source))
}

fn end_exchange(
    command: &EndExchange,
    session: &mut Session,
    store: &mut dyn CountStore,
    observer: &mut dyn SlotObserver,
) -> Result<Outcome, DomainError> {
    if session.take_drag() != Some(command.source) {
        return Err(DomainError::InvalidExchange(format!(
            "no drag in progress from {}",
            command.source
        )));
    }
    let Some(destination) = command.destination else {
        return Err(DomainError::InvalidExchange(
            "drop target is not a slot".to_owned(),
        ));
    };
    if destination == command.source {
        return Err(DomainError::InvalidExchange(format!(
            "{destination} was dropped on itself"
        )));
    }

    let exchange = ExchangeSlots {
        correlation_id: command.correlation_id,
        source: command.source,
        destination,
    };
    let receipt = try_exchange(&exchange, session, store)?;
    forward_slot_updates(&receipt.events, observer);
    Ok(Outcome::Exchanged(receipt))
}

fn activate_item(
    command: &ActivateItem,
    session: &mut Session,
    store: &mut dyn CountStore,
    observer: &mut dyn SlotObserver,
) -> Result<Outcome, DomainError> {
    let Some(listing_id) = session.shop_listing_id() else {
        debug!(slot = %command.slot, "Click outside shop mode ignored");
        return Ok(Outcome::Ignored);
    };
    let Some(item) = session.slot(command.slot)?.item().cloned() else {
        return Ok(Outcome::Ignored);
    };

    let outcome = if command.slot.inventory == listing_id {
        let buy = BuyItem {
            correlation_id: command.correlation_id,
            item,
        };
        let receipt = try_buy(&buy, session, store)?;
        forward_slot_updates(&receipt.events, observer);
        Outcome::Bought(receipt)
    } else {
        let sell = SellItem {
            correlation_id: command.correlation_id,
            seller: command.slot.inventory,
            item,
        };
        let receipt = try_sell(&sell, session, store)?;
        forward_slot_updates(&receipt.events, observer);
        Outcome::Sold(receipt)
    };
    session.refresh_availability(observer);
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use outfitter_core::error::DomainError;
    use outfitter_core::item::ItemPair;
    use outfitter_core::observer::Availability;
    use outfitter_core::persistence::CountStore;
    use outfitter_inventory::domain::aggregates::Inventory;
    use outfitter_test_support::{RecordingCountStore, RecordingObserver, items, sample_catalog};
    use uuid::Uuid;

    use super::{Outcome, dispatch};
    use crate::domain::aggregates::Session;
    use crate::domain::commands::{ActivateItem, BeginExchange, EndExchange, InputEvent, SlotRef};
    use crate::domain::shop::{ShopCatalog, ShopEntry};

    struct Harness {
        session: Session,
        store: RecordingCountStore,
        observer: RecordingObserver,
        player: Uuid,
    }

    impl Harness {
        fn new(coins: u32) -> Self {
            let store = RecordingCountStore::new();
            let mut session = Session::new(sample_catalog(), coins);
            let player = session
                .register_player_inventory(Inventory::general(
                    Uuid::new_v4(),
                    "player",
                    sample_catalog(),
                    &store,
                ))
                .unwrap();
            Self {
                session,
                store,
                observer: RecordingObserver::new(),
                player,
            }
        }

        fn send(&mut self, event: InputEvent) -> Result<Outcome, DomainError> {
            dispatch(&mut self.session, &event, &mut self.store, &mut self.observer)
        }

        fn open_shop(&mut self) -> Uuid {
            let shop = ShopCatalog {
                id: "outfitter".to_owned(),
                display_name: "Outfitter".to_owned(),
                entries: vec![ShopEntry {
                    item: items::torch(),
                    buy_price: 10,
                    sell_price: 6,
                }],
            };
            self.session
                .register_active_shop_inventory(shop, &mut self.observer)
                .unwrap()
        }
    }

    fn begin(source: SlotRef) -> InputEvent {
        InputEvent::BeginExchange(BeginExchange {
            correlation_id: Uuid::new_v4(),
            source,
        })
    }

    fn end(source: SlotRef, destination: Option<SlotRef>) -> InputEvent {
        InputEvent::EndExchange(EndExchange {
            correlation_id: Uuid::new_v4(),
            source,
            destination,
        })
    }

    fn click(slot: SlotRef) -> InputEvent {
        InputEvent::ActivateItem(ActivateItem {
            correlation_id: Uuid::new_v4(),
            slot,
        })
    }

    #[test]
    fn test_drag_and_drop_swaps_and_notifies() {
        // Arrange
        let mut h = Harness::new(0);
        let apples = SlotRef::new(h.player, 4);
        let torch = SlotRef::new(h.player, 5);

        // Act
        let started = h.send(begin(apples)).unwrap();
        let ended = h.send(end(apples, Some(torch))).unwrap();

        // Assert
        assert!(matches!(started, Outcome::DragStarted(slot) if slot == apples));
        assert!(matches!(ended, Outcome::Exchanged(_)));
        let refreshed: Vec<(usize, Option<ItemPair>)> = h
            .observer
            .info
            .iter()
            .map(|update| (update.slot_index, update.pair.clone()))
            .collect();
        assert_eq!(
            refreshed,
            vec![
                (4, Some(ItemPair::new(items::torch(), 1))),
                (5, Some(ItemPair::new(items::apple(), 3))),
            ]
        );
        assert_eq!(h.session.dragging(), None);
    }

    #[test]
    fn test_drop_outside_any_slot_is_invalid_and_clears_drag() {
        let mut h = Harness::new(0);
        let apples = SlotRef::new(h.player, 4);
        h.send(begin(apples)).unwrap();

        let result = h.send(end(apples, None));

        assert!(matches!(result, Err(DomainError::InvalidExchange(_))));
        assert_eq!(h.session.dragging(), None);
        assert!(h.observer.info.is_empty());
    }

    #[test]
    fn test_drop_on_source_slot_is_invalid() {
        let mut h = Harness::new(0);
        let apples = SlotRef::new(h.player, 4);
        h.send(begin(apples)).unwrap();

        let result = h.send(end(apples, Some(apples)));

        assert!(matches!(result, Err(DomainError::InvalidExchange(_))));
        assert!(h.store.writes().is_empty());
    }

    #[test]
    fn test_drop_without_drag_is_invalid() {
        let mut h = Harness::new(0);
        let apples = SlotRef::new(h.player, 4);

        let result = h.send(end(apples, Some(SlotRef::new(h.player, 5))));

        assert!(matches!(result, Err(DomainError::InvalidExchange(_))));
        assert!(h.store.writes().is_empty());
    }

    #[test]
    fn test_drag_is_refused_in_shop_mode() {
        let mut h = Harness::new(0);
        h.open_shop();

        let result = h.send(begin(SlotRef::new(h.player, 4)));

        assert!(matches!(result, Err(DomainError::InvalidExchange(_))));
        assert_eq!(h.session.dragging(), None);
    }

    #[test]
    fn test_click_outside_shop_mode_is_ignored() {
        let mut h = Harness::new(0);

        let outcome = h.send(click(SlotRef::new(h.player, 4))).unwrap();

        assert!(matches!(outcome, Outcome::Ignored));
        assert!(h.store.writes().is_empty());
    }

    #[test]
    fn test_click_on_listing_buys_and_refreshes_availability() {
        // Arrange
        let mut h = Harness::new(10);
        let listing = h.open_shop();

        // Act
        let outcome = h.send(click(SlotRef::new(listing, 0))).unwrap();

        // Assert
        let Outcome::Bought(receipt) = outcome else {
            panic!("expected a purchase");
        };
        assert_eq!(receipt.balance, 0);
        assert_eq!(h.store.get_count(&items::torch(), "player", 0), 2);
        assert_eq!(
            h.observer.last_availability(listing, 0),
            Some(Availability::Priced {
                price: 10,
                affordable: false
            })
        );
        assert!(h.observer.info.iter().any(|update| update.inventory == h.player
            && update.pair == Some(ItemPair::new(items::torch(), 2))));
    }

    #[test]
    fn test_click_on_player_slot_sells() {
        // Arrange
        let mut h = Harness::new(0);
        h.open_shop();

        // Act
        let outcome = h.send(click(SlotRef::new(h.player, 5))).unwrap();

        // Assert
        assert!(matches!(outcome, Outcome::Sold(ref receipt) if receipt.balance == 6));
        assert_eq!(h.session.coins(), 6);
        assert_eq!(h.session.slot(SlotRef::new(h.player, 5)).unwrap().pair(), None);
    }

    #[test]
    fn test_click_with_insufficient_funds_is_rejected() {
        let mut h = Harness::new(9);
        let listing = h.open_shop();

        let result = h.send(click(SlotRef::new(listing, 0)));

        assert_eq!(
            result.unwrap_err(),
            DomainError::InsufficientFunds {
                balance: 9,
                price: 10
            }
        );
        assert_eq!(h.session.coins(), 9);
        assert!(h.store.writes().is_empty());
    }

    #[test]
    fn test_click_on_unpriced_item_is_not_in_catalog() {
        let mut h = Harness::new(0);
        h.open_shop();

        let result = h.send(click(SlotRef::new(h.player, 4)));

        assert_eq!(result.unwrap_err(), DomainError::NotInCatalog(items::apple()));
        assert_eq!(h.session.coins(), 0);
    }

    #[test]
    fn test_click_on_empty_slot_is_ignored() {
        let mut h = Harness::new(0);
        h.open_shop();

        let outcome = h.send(click(SlotRef::new(h.player, 0))).unwrap();

        assert!(matches!(outcome, Outcome::Ignored));
    }

    #[test]
    fn test_click_out_of_range_fails_fast() {
        let mut h = Harness::new(0);
        h.open_shop();

        let result = h.send(click(SlotRef::new(h.player, 42)));

        assert_eq!(result.unwrap_err(), DomainError::OutOfRange { index: 42, len: 6 });
    }
}
