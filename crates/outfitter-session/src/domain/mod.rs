//! Domain layer for the Session & Shop context.

pub mod aggregates;
pub mod commands;
pub mod shop;
