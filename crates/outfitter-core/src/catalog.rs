//! The immutable registry of item definitions.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::DomainError;
use crate::item::{Item, ItemId};

/// On-disk shape of an item catalog file.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    items: Vec<Item>,
}

/// Ordered, immutable registry of item definitions.
///
/// Enumeration order is the order the items were declared in and never
/// changes; it doubles as the storage index of an item.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: Vec<Item>,
    index: HashMap<ItemId, usize>,
}

impl ItemCatalog {
    /// Builds a catalog from item definitions in declaration order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if two definitions share an id.
    pub fn from_items(items: Vec<Item>) -> Result<Self, DomainError> {
        let mut index = HashMap::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            if index.insert(item.id.clone(), position).is_some() {
                return Err(DomainError::Validation(format!(
                    "duplicate item id '{}' in catalog",
                    item.id
                )));
            }
        }
        Ok(Self { items, index })
    }

    /// Parses a catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the YAML is malformed and
    /// `DomainError::Validation` if ids are duplicated.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, DomainError> {
        let file: CatalogFile = serde_yaml::from_str(yaml)
            .map_err(|e| DomainError::Infrastructure(format!("item catalog parse failed: {e}")))?;
        Self::from_items(file.items)
    }

    /// Loads a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the file cannot be read or
    /// parsed and `DomainError::Validation` if ids are duplicated.
    pub fn load_from_path(path: &Path) -> Result<Self, DomainError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            DomainError::Infrastructure(format!("failed to read {}: {e}", path.display()))
        })?;
        let catalog = Self::from_yaml_str(&contents)?;
        info!(path = %path.display(), items = catalog.len(), "Loaded item catalog");
        Ok(catalog)
    }

    /// Looks up an item definition.
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.index.get(id).map(|&position| &self.items[position])
    }

    /// Looks up an item definition, failing with `UnknownItem`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownItem` if the id is not in the catalog.
    pub fn require(&self, id: &ItemId) -> Result<&Item, DomainError> {
        self.get(id).ok_or_else(|| DomainError::UnknownItem(id.clone()))
    }

    /// Returns the declaration position of an item.
    #[must_use]
    pub fn position(&self, id: &ItemId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Iterates over all items in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// Returns the number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the catalog holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ClothingCategory;

    const CATALOG_YAML: &str = r"
items:
  - id: straw_hat
    display_name: Straw Hat
    icon: icons/straw_hat.png
    category: head
  - id: linen_shirt
    display_name: Linen Shirt
    category: body
  - id: apple
    display_name: Apple
    starting_amount: 3
";

    #[test]
    fn test_from_yaml_str_preserves_declaration_order() {
        // Act
        let catalog = ItemCatalog::from_yaml_str(CATALOG_YAML).unwrap();

        // Assert
        let ids: Vec<&str> = catalog.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, vec!["straw_hat", "linen_shirt", "apple"]);
        assert_eq!(catalog.position(&ItemId::new("apple")), Some(2));
        assert_eq!(
            catalog.get(&ItemId::new("straw_hat")).unwrap().category,
            ClothingCategory::Head
        );
    }

    #[test]
    fn test_from_items_rejects_duplicate_ids() {
        // Arrange
        let items = vec![
            Item::new("apple", "Apple", ClothingCategory::None, 0),
            Item::new("apple", "Green Apple", ClothingCategory::None, 0),
        ];

        // Act
        let result = ItemCatalog::from_items(items);

        // Assert
        match result.unwrap_err() {
            DomainError::Validation(msg) => assert!(msg.contains("apple")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_require_returns_unknown_item() {
        let catalog = ItemCatalog::from_yaml_str(CATALOG_YAML).unwrap();

        let result = catalog.require(&ItemId::new("sword"));

        assert_eq!(result.unwrap_err(), DomainError::UnknownItem(ItemId::new("sword")));
    }

    #[test]
    fn test_from_yaml_str_reports_malformed_content() {
        let result = ItemCatalog::from_yaml_str("items: 12");

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }

    #[test]
    fn test_load_from_path_reads_file() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.yaml");
        std::fs::write(&path, CATALOG_YAML).unwrap();

        // Act
        let catalog = ItemCatalog::load_from_path(&path).unwrap();

        // Assert
        assert_eq!(catalog.len(), 3);
    }
}
