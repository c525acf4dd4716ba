//! Buy and sell transactions against the open shop.

use outfitter_core::error::DomainError;
use outfitter_core::item::ItemId;
use outfitter_core::persistence::CountStore;
use outfitter_inventory::application::command_handlers::{handle_gain_item, handle_lose_item};
use outfitter_inventory::domain::commands::{GainItem, LoseItem};
use outfitter_inventory::domain::events::InventoryEvent;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::domain::aggregates::Session;
use crate::domain::commands::{BuyItem, SellItem};

/// Result of a completed purchase or sale.
#[derive(Debug)]
pub struct TransactionReceipt {
    /// The item traded.
    pub item: ItemId,
    /// Coins debited (buy) or credited (sell).
    pub price: u32,
    /// Balance after the transaction.
    pub balance: u32,
    /// Inventory that gained or lost the unit.
    pub inventory_id: Uuid,
    /// Notifications of that inventory, in order.
    pub events: Vec<InventoryEvent>,
}

/// Buys one unit of `command.item` into the player inventory.
///
/// # Errors
///
/// Returns `DomainError::NotInCatalog` if the open shop does not sell the
/// item (or no shop is open), `DomainError::Validation` if no player
/// inventory is registered or it has no room, and
/// `DomainError::InsufficientFunds` if the balance is below the buy price.
/// Neither balance nor counts change on error.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id, item = %command.item))]
pub fn try_buy(
    command: &BuyItem,
    session: &mut Session,
    store: &mut dyn CountStore,
) -> Result<TransactionReceipt, DomainError> {
    let price = session.price_of(&command.item)?.buy_price;
    let buyer = session
        .player_inventory_id()
        .ok_or_else(|| DomainError::Validation("no player inventory registered".to_owned()))?;
    session.inventory(buyer)?.placement_for(&command.item, None)?;

    let balance = session.coins();
    if balance < price {
        info!(balance, price, "Purchase refused");
        return Err(DomainError::InsufficientFunds { balance, price });
    }

    let gain = GainItem {
        correlation_id: command.correlation_id,
        inventory_id: buyer,
        item: command.item.clone(),
        amount: 1,
    };
    let result = handle_gain_item(&gain, session.inventory_mut(buyer)?, store)?;
    session.debit(price);

    info!(price, balance = session.coins(), "Item bought");
    Ok(TransactionReceipt {
        item: command.item.clone(),
        price,
        balance: session.coins(),
        inventory_id: buyer,
        events: result.events,
    })
}

/// Sells one unit of `command.item` from `command.seller`.
///
/// Holdings are not checked: selling an item whose count is already zero
/// still credits the sell price.
///
/// # Errors
///
/// Returns `DomainError::NotInCatalog` if the open shop does not buy the
/// item (or no shop is open), `DomainError::InventoryNotFound` for an
/// unregistered seller and `DomainError::Validation` when the seller is the
/// shop's own listing.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id, item = %command.item, seller = %command.seller))]
pub fn try_sell(
    command: &SellItem,
    session: &mut Session,
    store: &mut dyn CountStore,
) -> Result<TransactionReceipt, DomainError> {
    let price = session.price_of(&command.item)?.sell_price;
    if session.shop_listing_id() == Some(command.seller) {
        return Err(DomainError::Validation(
            "the shop listing cannot sell to itself".to_owned(),
        ));
    }
    let held = session
        .inventory(command.seller)?
        .count_of(&command.item, store)?;
    if held == 0 {
        warn!("Selling an item with no units held");
    }

    let lose = LoseItem {
        correlation_id: command.correlation_id,
        inventory_id: command.seller,
        item: command.item.clone(),
        amount: 1,
    };
    let result = handle_lose_item(&lose, session.inventory_mut(command.seller)?, store)?;
    session.credit(price);

    info!(price, balance = session.coins(), "Item sold");
    Ok(TransactionReceipt {
        item: command.item.clone(),
        price,
        balance: session.coins(),
        inventory_id: command.seller,
        events: result.events,
    })
}

#[cfg(test)]
mod tests {
    use outfitter_core::error::DomainError;
    use outfitter_core::observer::NullObserver;
    use outfitter_core::persistence::CountStore;
    use outfitter_inventory::domain::aggregates::Inventory;
    use outfitter_test_support::{RecordingCountStore, items, sample_catalog};
    use uuid::Uuid;

    use super::{try_buy, try_sell};
    use crate::domain::aggregates::Session;
    use crate::domain::commands::{BuyItem, SellItem};
    use crate::domain::shop::{ShopCatalog, ShopEntry};

    fn shop() -> ShopCatalog {
        ShopCatalog {
            id: "market".to_owned(),
            display_name: "Market".to_owned(),
            entries: vec![
                ShopEntry {
                    item: items::torch(),
                    buy_price: 10,
                    sell_price: 10,
                },
                ShopEntry {
                    item: items::apple(),
                    buy_price: 4,
                    sell_price: 1,
                },
            ],
        }
    }

    fn open_market(coins: u32) -> (Session, RecordingCountStore, Uuid) {
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
        session
            .register_active_shop_inventory(shop(), &mut NullObserver)
            .unwrap();
        (session, store, player)
    }

    fn buy(item: outfitter_core::item::ItemId) -> BuyItem {
        BuyItem {
            correlation_id: Uuid::new_v4(),
            item,
        }
    }

    fn sell(seller: Uuid, item: outfitter_core::item::ItemId) -> SellItem {
        SellItem {
            correlation_id: Uuid::new_v4(),
            seller,
            item,
        }
    }

    #[test]
    fn test_buy_debits_balance_and_credits_player() {
        // Arrange
        let (mut session, mut store, player) = open_market(10);

        // Act
        let receipt = try_buy(&buy(items::torch()), &mut session, &mut store).unwrap();

        // Assert
        assert_eq!(receipt.balance, 0);
        assert_eq!(receipt.inventory_id, player);
        assert_eq!(session.coins(), 0);
        assert_eq!(store.get_count(&items::torch(), "player", 0), 2);
        assert!(!receipt.events.is_empty());
    }

    #[test]
    fn test_buy_with_insufficient_funds_changes_nothing() {
        // Arrange
        let (mut session, mut store, _) = open_market(9);

        // Act
        let result = try_buy(&buy(items::torch()), &mut session, &mut store);

        // Assert
        assert_eq!(
            result.unwrap_err(),
            DomainError::InsufficientFunds {
                balance: 9,
                price: 10
            }
        );
        assert_eq!(session.coins(), 9);
        assert!(store.writes().is_empty());
    }

    #[test]
    fn test_buy_item_not_in_catalog() {
        let (mut session, mut store, _) = open_market(100);

        let result = try_buy(&buy(items::straw_hat()), &mut session, &mut store);

        assert_eq!(
            result.unwrap_err(),
            DomainError::NotInCatalog(items::straw_hat())
        );
        assert_eq!(session.coins(), 100);
    }

    #[test]
    fn test_buy_without_open_shop_is_not_in_catalog() {
        let (mut session, mut store, _) = open_market(100);
        session.unregister_active_shop_inventory(&mut NullObserver);

        let result = try_buy(&buy(items::torch()), &mut session, &mut store);

        assert_eq!(result.unwrap_err(), DomainError::NotInCatalog(items::torch()));
    }

    #[test]
    fn test_buy_then_sell_nets_price_difference() {
        // Arrange
        let (mut session, mut store, player) = open_market(20);

        // Act
        try_buy(&buy(items::apple()), &mut session, &mut store).unwrap();
        try_sell(&sell(player, items::apple()), &mut session, &mut store).unwrap();

        // Assert
        assert_eq!(session.coins(), 20 - 4 + 1);
        assert_eq!(store.get_count(&items::apple(), "player", 0), 3);
    }

    #[test]
    fn test_buy_then_sell_at_equal_prices_restores_balance() {
        let (mut session, mut store, player) = open_market(15);

        try_buy(&buy(items::torch()), &mut session, &mut store).unwrap();
        try_sell(&sell(player, items::torch()), &mut session, &mut store).unwrap();

        assert_eq!(session.coins(), 15);
    }

    #[test]
    fn test_sell_without_holdings_still_credits() {
        // Arrange
        let (mut session, mut store, player) = open_market(0);
        store.set_count(&items::torch(), "player", 0);

        // Act
        let receipt = try_sell(&sell(player, items::torch()), &mut session, &mut store).unwrap();

        // Assert
        assert_eq!(receipt.balance, 10);
        assert_eq!(store.get_count(&items::torch(), "player", 9), 0);
    }

    #[test]
    fn test_sell_from_listing_is_rejected() {
        let (mut session, mut store, _) = open_market(0);
        let listing = session.shop_listing_id().unwrap();

        let result = try_sell(&sell(listing, items::torch()), &mut session, &mut store);

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(session.coins(), 0);
    }
}
