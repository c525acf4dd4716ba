//! Outfitter — Session & Shop context.
//!
//! Responsible for the process-wide session state (active shop, balance,
//! registered inventories), the slot exchange protocol between
//! inventories and buy/sell transactions against a shop catalog.
//!
//! Everything runs synchronously on the caller's thread. Requests are
//! handled strictly in the order they are dispatched; nothing here locks,
//! so a multi-threaded caller must serialize access to the `Session`.

pub mod application;
pub mod domain;
