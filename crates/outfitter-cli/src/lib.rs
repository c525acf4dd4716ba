//! Outfitter — line-oriented driver library.
//!
//! Loads content and the save file, then feeds script lines through the
//! session dispatcher.

pub mod config;
pub mod error;
pub mod observer;
pub mod runner;
pub mod script;
pub mod state;
