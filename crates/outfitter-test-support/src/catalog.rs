//! Sample item catalog shared by tests.

use std::sync::Arc;

use outfitter_core::catalog::ItemCatalog;
use outfitter_core::item::{ClothingCategory, Item};

/// Builds the sample catalog, in this order:
///
/// | index | id | category | starting amount |
/// |---|---|---|---|
/// | 0 | `straw_hat` | head | 0 |
/// | 1 | `iron_helm` | head | 0 |
/// | 2 | `linen_shirt` | body | 0 |
/// | 3 | `chainmail` | body | 0 |
/// | 4 | `apple` | none | 3 |
/// | 5 | `torch` | none | 1 |
///
/// # Panics
///
/// Panics if the fixture ids are not unique.
#[must_use]
pub fn sample_catalog() -> Arc<ItemCatalog> {
    let items = vec![
        Item::new("straw_hat", "Straw Hat", ClothingCategory::Head, 0),
        Item::new("iron_helm", "Iron Helm", ClothingCategory::Head, 0),
        Item::new("linen_shirt", "Linen Shirt", ClothingCategory::Body, 0),
        Item::new("chainmail", "Chainmail", ClothingCategory::Body, 0),
        Item::new("apple", "Apple", ClothingCategory::None, 3),
        Item::new("torch", "Torch", ClothingCategory::None, 1),
    ];
    Arc::new(ItemCatalog::from_items(items).expect("sample catalog ids are unique"))
}

/// Identifiers of the sample catalog items.
pub mod items {
    use outfitter_core::item::ItemId;

    /// Head item, starting amount 0.
    #[must_use]
    pub fn straw_hat() -> ItemId {
        ItemId::new("straw_hat")
    }

    /// Head item, starting amount 0.
    #[must_use]
    pub fn iron_helm() -> ItemId {
        ItemId::new("iron_helm")
    }

    /// Body item, starting amount 0.
    #[must_use]
    pub fn linen_shirt() -> ItemId {
        ItemId::new("linen_shirt")
    }

    /// Body item, starting amount 0.
    #[must_use]
    pub fn chainmail() -> ItemId {
        ItemId::new("chainmail")
    }

    /// Non-wearable, starting amount 3.
    #[must_use]
    pub fn apple() -> ItemId {
        ItemId::new("apple")
    }

    /// Non-wearable, starting amount 1.
    #[must_use]
    pub fn torch() -> ItemId {
        ItemId::new("torch")
    }
}
