//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

use crate::item::ItemId;

/// Top-level domain error type.
///
/// Every failure is local and recoverable: an operation that returns an error
/// has not changed any inventory, count or balance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A slot index outside `[0, len)`.
    #[error("slot index {index} out of range for inventory with {len} slots")]
    OutOfRange {
        /// The offending index.
        index: usize,
        /// The number of slots in the inventory.
        len: usize,
    },

    /// A semantically disallowed move between two slots.
    #[error("invalid exchange: {0}")]
    InvalidExchange(String),

    /// The item is not priced by the active shop, or no shop is active.
    #[error("item {0} is not in the active shop catalog")]
    NotInCatalog(ItemId),

    /// The balance does not cover the buy price.
    #[error("insufficient funds: balance {balance}, price {price}")]
    InsufficientFunds {
        /// The current balance.
        balance: u32,
        /// The price that was asked.
        price: u32,
    },

    /// No registered inventory has this identifier.
    #[error("inventory not found: {0}")]
    InventoryNotFound(Uuid),

    /// The item catalog has no definition for this identifier.
    #[error("unknown item: {0}")]
    UnknownItem(ItemId),

    /// Malformed content or an impossible placement.
    #[error("validation error: {0}")]
    Validation(String),

    /// An I/O or serialization failure.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
