use super::money::{Balance, Price};
use super::seller::SellerId;
use crate::error::MarketError;
use serde::{Deserialize, Serialize};

/// Internal record key. Products are addressed by name on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub u32);

/// A product listed by a seller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub quantity: u32,
    /// The seller that listed the product.
    pub seller: SellerId,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: Price,
        quantity: u32,
        seller: SellerId,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            quantity,
            seller,
        }
    }

    /// Fails with `InsufficientStock` if fewer than `requested` units remain.
    pub fn ensure_in_stock(&self, requested: u32) -> Result<(), MarketError> {
        if requested <= self.quantity {
            Ok(())
        } else {
            Err(MarketError::InsufficientStock {
                requested,
                available: self.quantity,
            })
        }
    }

    /// Total cost of `quantity` units; `None` on decimal overflow.
    pub fn cost_of(&self, quantity: u32) -> Option<Balance> {
        self.price.total_for(quantity)
    }

    /// Removes `quantity` units from stock.
    pub fn take(&mut self, quantity: u32) -> Result<(), MarketError> {
        self.ensure_in_stock(quantity)?;
        self.quantity -= quantity;
        Ok(())
    }
}
