use crate::error::{MarketError, excerpt};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Sub, SubAssign};
use std::str::FromStr;

/// A signed monetary value.
///
/// Wraps `rust_decimal::Decimal` so that customer balances and purchase totals
/// never get mixed up with plain numbers. Creation is unvalidated: a customer
/// may be registered with any balance.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Balance(pub Decimal);

/// A strictly positive unit price.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Price(Decimal);

impl Price {
    pub fn new(value: Decimal) -> Result<Self, MarketError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(MarketError::MalformedCommand(format!(
                "price must be positive, got {}",
                value.normalize()
            )))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Cost of `quantity` units, or `None` if the product overflows.
    pub fn total_for(&self, quantity: u32) -> Option<Balance> {
        self.0.checked_mul(Decimal::from(quantity)).map(Balance)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = MarketError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for Price {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s)
            .map_err(|_| MarketError::MalformedCommand(format!("invalid price: {}", excerpt(s))))?;
        Self::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Balance {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl FromStr for Balance {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .map(Self)
            .map_err(|_| MarketError::MalformedCommand(format!("invalid balance: {}", excerpt(s))))
    }
}

impl Sub for Balance {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Balance {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_balance_arithmetic() {
        let mut b1 = Balance::new(dec!(100.0));
        let b2 = Balance::new(dec!(30.0));
        assert_eq!(b1 - b2, Balance::new(dec!(70.0)));
        b1 -= b2;
        assert_eq!(b1, Balance::new(dec!(70)));
    }

    #[test]
    fn test_price_validation() {
        assert!(Price::new(dec!(0.01)).is_ok());
        assert!(matches!(
            Price::new(dec!(0.0)),
            Err(MarketError::MalformedCommand(_))
        ));
        assert!(matches!(
            Price::new(dec!(-1.0)),
            Err(MarketError::MalformedCommand(_))
        ));
    }

    #[test]
    fn test_price_parsing() {
        assert_eq!("10".parse::<Price>().unwrap().value(), dec!(10));
        assert_eq!("2.50".parse::<Price>().unwrap().value(), dec!(2.50));
        assert!("ten".parse::<Price>().is_err());
        assert!("-3".parse::<Price>().is_err());
    }

    #[test]
    fn test_balance_parsing_accepts_any_decimal() {
        assert_eq!("100".parse::<Balance>().unwrap(), Balance::new(dec!(100)));
        assert_eq!("-5.5".parse::<Balance>().unwrap(), Balance::new(dec!(-5.5)));
        assert!("lots".parse::<Balance>().is_err());
    }

    #[test]
    fn test_total_for() {
        let price = Price::new(dec!(10)).unwrap();
        assert_eq!(price.total_for(3), Some(Balance::new(dec!(30))));
        assert_eq!(price.total_for(0), Some(Balance::ZERO));

        let huge = Price::new(Decimal::MAX).unwrap();
        assert_eq!(huge.total_for(2), None);
    }

    #[test]
    fn test_display_is_normalized() {
        assert_eq!(Balance::new(dec!(70.00)).to_string(), "70");
        assert_eq!(Price::new(dec!(2.50)).unwrap().to_string(), "2.5");
    }
}
