//! Application layer: the marketplace state machine and the command dispatcher
//! that drives it from protocol text.

pub mod dispatcher;
pub mod marketplace;

pub use dispatcher::{Command, dispatch};
pub use marketplace::{MarketSnapshot, Marketplace, ProductListing};
