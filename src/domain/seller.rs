use serde::{Deserialize, Serialize};
use std::fmt;

/// Sequential seller identifier. The first registered seller gets id 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SellerId(pub u32);

impl SellerId {
    pub const FIRST: Self = Self(1);

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for SellerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered seller. Sellers are never mutated or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    pub id: SellerId,
    pub name: String,
}

impl Seller {
    pub fn new(id: SellerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seller_id_sequence() {
        assert_eq!(SellerId::FIRST, SellerId(1));
        assert_eq!(SellerId::FIRST.next(), SellerId(2));
        assert_eq!(SellerId(41).next().to_string(), "42");
    }
}
