//! Outfitter Core — shared domain abstractions.
//!
//! This crate defines the item model, the item catalog, the persistence
//! contract for per-item counts and the contract of the UI collaborator.
//! Inventories and the session coordinator build on top of it.

pub mod catalog;
pub mod command;
pub mod error;
pub mod item;
pub mod observer;
pub mod persistence;
