use super::money::Balance;
use crate::error::{MarketError, excerpt};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// How a purchase is settled.
///
/// The set is closed: it is fixed by the tokens the protocol recognizes. Each
/// variant is stateless and differs only in its label and in how the
/// settlement is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PaymentMethod {
    Cash,
    Card,
    Crypto,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [Self::Cash, Self::Card, Self::Crypto];

    /// Maps a wire token to a payment method. Matching is case-sensitive.
    ///
    /// Both the English labels and the localized labels used by older
    /// clients are recognized.
    pub fn from_token(token: &str) -> Result<Self, MarketError> {
        match token {
            "Cash" | "Наличные" => Ok(Self::Cash),
            "Card" | "Карта" => Ok(Self::Card),
            "Crypto" | "Криптовалюта" => Ok(Self::Crypto),
            other => Err(MarketError::UnknownPaymentMethod(excerpt(other))),
        }
    }

    /// Display label shown on receipts.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Card => "Card",
            Self::Crypto => "Crypto",
        }
    }

    /// Settles `amount`. Recording the settlement is the only effect; it
    /// cannot fail and does not influence the purchase.
    pub fn apply(&self, amount: Balance) {
        match self {
            Self::Cash => tracing::info!(method = "cash", %amount, "Payment in cash"),
            Self::Card => tracing::info!(method = "card", %amount, "Payment by card"),
            Self::Crypto => tracing::info!(method = "crypto", %amount, "Payment in cryptocurrency"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_tokens() {
        assert_eq!(PaymentMethod::from_token("Cash"), Ok(PaymentMethod::Cash));
        assert_eq!(PaymentMethod::from_token("Card"), Ok(PaymentMethod::Card));
        assert_eq!(PaymentMethod::from_token("Crypto"), Ok(PaymentMethod::Crypto));
    }

    #[test]
    fn test_localized_tokens() {
        assert_eq!(PaymentMethod::from_token("Наличные"), Ok(PaymentMethod::Cash));
        assert_eq!(PaymentMethod::from_token("Карта"), Ok(PaymentMethod::Card));
        assert_eq!(
            PaymentMethod::from_token("Криптовалюта"),
            Ok(PaymentMethod::Crypto)
        );
    }

    #[test]
    fn test_tokens_are_case_sensitive() {
        assert_eq!(
            PaymentMethod::from_token("cash"),
            Err(MarketError::UnknownPaymentMethod("cash".to_string()))
        );
        assert!("Bitcoin".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_labels_round_trip_through_tokens() {
        for method in PaymentMethod::ALL {
            assert_eq!(PaymentMethod::from_token(method.name()), Ok(method));
        }
    }
}
