//! Application layer for the Session & Shop context.

pub mod dispatcher;
pub mod exchange;
pub mod transactions;
