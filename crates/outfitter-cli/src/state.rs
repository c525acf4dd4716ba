//! Driver state: the session, its save file and the loaded content.

use std::sync::Arc;

use outfitter_core::catalog::ItemCatalog;
use outfitter_core::persistence::JsonFileCountStore;
use outfitter_inventory::domain::aggregates::Inventory;
use outfitter_session::domain::aggregates::Session;
use outfitter_session::domain::shop::ShopRegistry;
use tracing::info;
use uuid::Uuid;

use crate::config::Config;
use crate::error::AppError;

/// Save key of the player's general inventory.
pub const PLAYER_SAVE_KEY: &str = "player";
/// Save key of the player's clothing inventory.
pub const WARDROBE_SAVE_KEY: &str = "wardrobe";

/// Everything a script runs against.
#[derive(Debug)]
pub struct AppState {
    /// Session state passed to the dispatcher.
    pub session: Session,
    /// Persisted item counts.
    pub store: JsonFileCountStore,
    /// Shops that can be opened.
    pub shops: ShopRegistry,
    /// The player's general inventory.
    pub player_id: Uuid,
    /// The player's clothing inventory.
    pub wardrobe_id: Uuid,
}

impl AppState {
    /// Loads content and the save file, then registers the player's
    /// inventories.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Domain` if content or the save file cannot be read.
    pub fn load(config: &Config) -> Result<Self, AppError> {
        let catalog = Arc::new(ItemCatalog::load_from_path(&config.items_path())?);
        let mut shops = ShopRegistry::new();
        shops.load_from_directory(&config.shops_dir(), &catalog)?;
        let store = JsonFileCountStore::open(&config.save_file)?;

        let mut session = Session::new(Arc::clone(&catalog), config.starting_coins);
        let player_id = session.register_player_inventory(Inventory::general(
            Uuid::new_v4(),
            PLAYER_SAVE_KEY,
            Arc::clone(&catalog),
            &store,
        ))?;
        let wardrobe_id = session.register_clothing_inventory(Inventory::clothing(
            Uuid::new_v4(),
            WARDROBE_SAVE_KEY,
            catalog,
            &store,
        ))?;

        info!(
            items = session.item_catalog().len(),
            shops = shops.len(),
            coins = session.coins(),
            "Session ready"
        );
        Ok(Self {
            session,
            store,
            shops,
            player_id,
            wardrobe_id,
        })
    }

    /// Writes pending count changes to the save file.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Domain` if the save file cannot be written.
    pub fn save(&mut self) -> Result<(), AppError> {
        self.store.flush()?;
        Ok(())
    }
}
