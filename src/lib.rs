//! In-memory marketplace engine served over a framed TCP text protocol.
//!
//! - [`domain`]: sellers, customers, products, money and payment methods
//! - [`infrastructure`]: in-memory storage behind the domain ports
//! - [`application`]: the marketplace state machine and command dispatcher
//! - [`interfaces`]: the TCP server and its per-connection loop

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
pub mod telemetry;
