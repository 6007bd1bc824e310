use super::money::Balance;
use super::payment::PaymentMethod;
use serde::Serialize;
use std::fmt;

/// Proof of a completed purchase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Receipt {
    pub product: String,
    pub quantity: u32,
    pub total: Balance,
    pub payment_method: PaymentMethod,
    /// The customer's balance after the debit.
    pub remaining_balance: Balance,
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Purchase completed. Receipt:")?;
        writeln!(
            f,
            "Product: {}, Quantity: {}, Total: {}",
            self.product, self.quantity, self.total
        )?;
        writeln!(f, "Payment method: {}", self.payment_method)?;
        write!(f, "Remaining balance: {}", self.remaining_balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_receipt_rendering() {
        let receipt = Receipt {
            product: "Apple".to_string(),
            quantity: 3,
            total: Balance::new(dec!(30.00)),
            payment_method: PaymentMethod::Cash,
            remaining_balance: Balance::new(dec!(70.00)),
        };
        assert_eq!(
            receipt.to_string(),
            "Purchase completed. Receipt:\n\
             Product: Apple, Quantity: 3, Total: 30\n\
             Payment method: Cash\n\
             Remaining balance: 70"
        );
    }
}
