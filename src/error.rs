use crate::domain::money::Balance;
use thiserror::Error;

/// Business-level failures.
///
/// Every variant is recovered locally: it is rendered into the response text and
/// leaves the marketplace untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketError {
    #[error("customer not found: {0}")]
    CustomerNotFound(String),
    #[error("product not found: {0}")]
    ProductNotFound(String),
    #[error("seller not found: {0}")]
    SellerNotFound(String),
    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },
    #[error("insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: Balance, available: Balance },
    #[error("insufficient funds: total for {quantity} unit(s) is out of range, available {available}")]
    TotalOverflow { quantity: u32, available: Balance },
    #[error("no payment method selected")]
    NoPaymentMethodSelected,
    #[error("unknown payment method: {0}")]
    UnknownPaymentMethod(String),
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("empty command")]
    EmptyCommand,
    #[error("malformed command: {0}")]
    MalformedCommand(String),
    #[error("response too large: {size} bytes exceeds limit of {limit}")]
    ResponseTooLarge { size: usize, limit: usize },
}

/// Transport-level failures. These end the connection they occurred on.
#[derive(Error, Debug)]
pub enum ConnectionError {
    #[error("connection closed by peer")]
    Closed,
    #[error("frame of {size} bytes exceeds limit of {limit}")]
    FrameTooLarge { size: usize, limit: usize },
    #[error("frame is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = MarketError> = std::result::Result<T, E>;

/// Longest client token echoed back in an error, in bytes.
pub const MAX_ECHOED_TOKEN_BYTES: usize = 32;

/// Shortens a client-supplied token for inclusion in an error message.
pub fn excerpt(token: &str) -> String {
    if token.len() <= MAX_ECHOED_TOKEN_BYTES {
        return token.to_string();
    }
    let end = token
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .take_while(|&end| end <= MAX_ECHOED_TOKEN_BYTES)
        .last()
        .unwrap_or(0);
    format!("{}…", &token[..end])
}
