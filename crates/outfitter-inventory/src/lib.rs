//! Outfitter — Inventory context.
//!
//! Responsible for fixed-size slot storage, per-item persisted counts,
//! category-routed clothing slots and slot exchange inside one inventory.

pub mod application;
pub mod domain;
