//! Domain layer: marketplace entities, money, payment methods and storage ports.

pub mod customer;
pub mod money;
pub mod payment;
pub mod ports;
pub mod product;
pub mod receipt;
pub mod seller;
