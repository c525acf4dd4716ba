//! Price lists referencing item catalog entries.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use outfitter_core::catalog::ItemCatalog;
use outfitter_core::error::DomainError;
use outfitter_core::item::ItemId;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Price of one item in a shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopEntry {
    /// The item priced.
    pub item: ItemId,
    /// Coins debited when the player buys one unit.
    pub buy_price: u32,
    /// Coins credited when the player sells one unit.
    pub sell_price: u32,
}

/// A read-only price list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopCatalog {
    /// Unique shop identifier.
    pub id: String,
    /// Name shown to the player.
    pub display_name: String,
    /// Priced items, in display order.
    #[serde(default)]
    pub entries: Vec<ShopEntry>,
}

impl ShopCatalog {
    /// Parses a shop catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the YAML is malformed.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, DomainError> {
        serde_yaml::from_str(yaml)
            .map_err(|e| DomainError::Infrastructure(format!("shop catalog parse failed: {e}")))
    }

    /// Looks up the price entry of an item.
    #[must_use]
    pub fn entry(&self, item: &ItemId) -> Option<&ShopEntry> {
        self.entries.iter().find(|entry| &entry.item == item)
    }

    /// Returns `true` if the shop prices `item`.
    #[must_use]
    pub fn contains(&self, item: &ItemId) -> bool {
        self.entry(item).is_some()
    }

    /// Items priced by this shop, in display order.
    #[must_use]
    pub fn items(&self) -> Vec<ItemId> {
        self.entries.iter().map(|entry| entry.item.clone()).collect()
    }

    /// Checks every entry against the item catalog.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownItem` for the first entry whose item is
    /// not defined and `DomainError::Validation` if an item is priced twice.
    pub fn validate(&self, catalog: &ItemCatalog) -> Result<(), DomainError> {
        for (position, entry) in self.entries.iter().enumerate() {
            catalog.require(&entry.item)?;
            if self.entries[..position]
                .iter()
                .any(|earlier| earlier.item == entry.item)
            {
                return Err(DomainError::Validation(format!(
                    "shop '{}' prices {} twice",
                    self.id, entry.item
                )));
            }
        }
        Ok(())
    }
}

/// Registry of every shop catalog known to the game.
#[derive(Debug, Default)]
pub struct ShopRegistry {
    shops: HashMap<String, ShopCatalog>,
}

impl ShopRegistry {
    /// Create a new empty shop registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.yaml` shop catalog in a directory, validating each
    /// against the item catalog. A missing directory loads nothing.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if a file cannot be read or
    /// parsed, and the validation error of the first invalid catalog.
    pub fn load_from_directory(
        &mut self,
        path: &Path,
        catalog: &ItemCatalog,
    ) -> Result<(), DomainError> {
        if !path.exists() {
            warn!(path = %path.display(), "Shop directory does not exist");
            return Ok(());
        }

        let entries = fs::read_dir(path).map_err(|e| {
            DomainError::Infrastructure(format!("failed to list {}: {e}", path.display()))
        })?;
        let mut files = Vec::new();
        for entry in entries {
            let file_path = entry
                .map_err(|e| DomainError::Infrastructure(e.to_string()))?
                .path();
            if file_path.extension().and_then(|ext| ext.to_str()) == Some("yaml") {
                files.push(file_path);
            }
        }
        files.sort();

        for file_path in files {
            let contents = fs::read_to_string(&file_path).map_err(|e| {
                DomainError::Infrastructure(format!(
                    "failed to read {}: {e}",
                    file_path.display()
                ))
            })?;
            let shop = ShopCatalog::from_yaml_str(&contents)?;
            shop.validate(catalog)?;
            self.insert(shop);
        }

        info!(shops = self.shops.len(), "Loaded shop catalogs");
        Ok(())
    }

    /// Adds a shop, replacing any shop with the same id.
    pub fn insert(&mut self, shop: ShopCatalog) {
        if self.shops.contains_key(&shop.id) {
            warn!(shop_id = %shop.id, "Duplicate shop id, overwriting");
        }
        self.shops.insert(shop.id.clone(), shop);
    }

    /// Get a shop catalog by id.
    #[must_use]
    pub fn get(&self, shop_id: &str) -> Option<&ShopCatalog> {
        self.shops.get(shop_id)
    }

    /// Shop ids, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.shops.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of shops.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shops.len()
    }

    /// Returns `true` if no shop is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shops.is_empty()
    }
}
