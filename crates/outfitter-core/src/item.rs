//! Item definitions and slot contents.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identity of an item definition.
///
/// Items are defined once in the catalog and referenced everywhere else by
/// this identifier, never copied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Creates an identifier from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Equipment category constraining which clothing slot an item may occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClothingCategory {
    /// Not wearable.
    #[default]
    None,
    /// Worn on the head.
    Head,
    /// Worn on the body.
    Body,
}

impl ClothingCategory {
    /// Returns the lowercase name used in content files and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Head => "head",
            Self::Body => "body",
        }
    }
}

/// An immutable item definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Stable identity.
    pub id: ItemId,
    /// Name shown to the player.
    pub display_name: String,
    /// Icon asset path, resolved by the UI layer.
    #[serde(default)]
    pub icon: String,
    /// Equipment category.
    #[serde(default)]
    pub category: ClothingCategory,
    /// Count assumed when nothing has been saved yet.
    #[serde(default)]
    pub starting_amount: u32,
}

impl Item {
    /// Creates an item with an empty icon path.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        category: ClothingCategory,
        starting_amount: u32,
    ) -> Self {
        Self {
            id: ItemId::new(id),
            display_name: display_name.into(),
            icon: String::new(),
            category,
            starting_amount,
        }
    }
}

/// What currently occupies a slot: an item reference and its count.
///
/// Rebuilt on every slot mutation rather than edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPair {
    /// The item held.
    pub item: ItemId,
    /// The owned count, always greater than zero inside a slot.
    pub amount: u32,
}

impl ItemPair {
    /// Creates a new pair.
    #[must_use]
    pub fn new(item: ItemId, amount: u32) -> Self {
        Self { item, amount }
    }
}
