//! Outer interfaces through which clients reach the marketplace.

pub mod tcp;
