//! Domain layer for the Inventory context.

pub mod aggregates;
pub mod commands;
pub mod events;
pub mod placement;
pub mod slot;
