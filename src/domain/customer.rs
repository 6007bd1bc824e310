use super::money::Balance;
use crate::error::MarketError;
use serde::{Deserialize, Serialize};

/// Internal record key. Customers are addressed by name on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomerId(pub u32);

/// A customer and the funds they can spend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub balance: Balance,
}

impl Customer {
    pub fn new(id: CustomerId, name: impl Into<String>, balance: Balance) -> Self {
        Self {
            id,
            name: name.into(),
            balance,
        }
    }

    /// Fails with `InsufficientFunds` unless the balance covers `amount`.
    pub fn ensure_can_afford(&self, amount: Balance) -> Result<(), MarketError> {
        if self.balance >= amount {
            Ok(())
        } else {
            Err(MarketError::InsufficientFunds {
                required: amount,
                available: self.balance,
            })
        }
    }

    /// Debits the balance if sufficient.
    pub fn debit(&mut self, amount: Balance) -> Result<(), MarketError> {
        self.ensure_can_afford(amount)?;
        self.balance -= amount;
        Ok(())
    }
}
