//! Shared test doubles and fixtures for the Outfitter inventory engine.

mod catalog;
mod observer;
mod store;

pub use catalog::{items, sample_catalog};
pub use observer::{AvailabilityUpdate, InfoUpdate, RecordingObserver};
pub use store::RecordingCountStore;
