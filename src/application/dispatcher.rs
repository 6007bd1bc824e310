use super::marketplace::Marketplace;
use crate::domain::money::{Balance, Price};
use crate::domain::payment::PaymentMethod;
use crate::error::{MarketError, Result, excerpt};
use std::str::FromStr;

/// Prefix that marks a response as a business error.
pub const ERROR_MARKER: &str = "Error: ";

/// Longest accepted seller, customer or product name, in bytes.
///
/// Keeps every success response, receipts included, within
/// [`MIN_FRAME_BYTES`](crate::config::MIN_FRAME_BYTES).
pub const MAX_NAME_BYTES: usize = 64;

/// One parsed client request.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddSeller {
        name: String,
    },
    AddCustomer {
        name: String,
        balance: Balance,
    },
    AddProduct {
        seller: String,
        product: String,
        price: Price,
        quantity: u32,
    },
    DisplayProducts,
    BuyProduct {
        customer: String,
        product: String,
        quantity: u32,
        payment_method: PaymentMethod,
    },
}

impl Command {
    /// Parses a whitespace-delimited command line. The first token is the verb.
    pub fn parse(line: &str) -> Result<Self> {
        let mut tokens = line.split_whitespace();
        let verb = tokens.next().ok_or(MarketError::EmptyCommand)?;
        let args: Vec<&str> = tokens.collect();

        match verb {
            "addSeller" => {
                let [name] = expect_args::<1>(verb, &args, "<sellerName>")?;
                Ok(Self::AddSeller {
                    name: parse_name("seller", name)?,
                })
            }
            "addCustomer" => {
                let [name, balance] = expect_args::<2>(verb, &args, "<customerName> <balance>")?;
                Ok(Self::AddCustomer {
                    name: parse_name("customer", name)?,
                    balance: balance.parse()?,
                })
            }
            "addProduct" => {
                let [seller, product, price, quantity] = expect_args::<4>(
                    verb,
                    &args,
                    "<sellerName> <productName> <price> <quantity>",
                )?;
                Ok(Self::AddProduct {
                    seller: parse_name("seller", seller)?,
                    product: parse_name("product", product)?,
                    price: price.parse()?,
                    quantity: parse_quantity(quantity)?,
                })
            }
            "displayProducts" => {
                expect_args::<0>(verb, &args, "")?;
                Ok(Self::DisplayProducts)
            }
            "buyProduct" => {
                let [customer, product, quantity, payment_method] = expect_args::<4>(
                    verb,
                    &args,
                    "<customerName> <productName> <quantity> <paymentMethod>",
                )?;
                Ok(Self::BuyProduct {
                    customer: parse_name("customer", customer)?,
                    product: parse_name("product", product)?,
                    quantity: parse_quantity(quantity)?,
                    payment_method: PaymentMethod::from_token(payment_method)?,
                })
            }
            other => Err(MarketError::UnknownCommand(excerpt(other))),
        }
    }

    /// Runs the command against `market` and renders the success text.
    pub async fn execute(self, market: &Marketplace) -> Result<String> {
        match self {
            Self::AddSeller { name } => {
                let id = market.add_seller(&name).await?;
                Ok(format!("Seller added: {name} (id {id})"))
            }
            Self::AddCustomer { name, balance } => {
                market.add_customer(&name, balance).await?;
                Ok(format!("Customer added: {name}"))
            }
            Self::AddProduct {
                seller,
                product,
                price,
                quantity,
            } => {
                let seller_id = market.add_product(&seller, &product, price, quantity).await?;
                Ok(format!("Product added: {product} (seller {seller_id})"))
            }
            Self::DisplayProducts => Ok(market.list_products().await?.to_string()),
            Self::BuyProduct {
                customer,
                product,
                quantity,
                payment_method,
            } => {
                let receipt = market
                    .buy_product(&customer, &product, quantity, Some(payment_method))
                    .await?;
                Ok(receipt.to_string())
            }
        }
    }
}

impl FromStr for Command {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn expect_args<'a, const N: usize>(
    verb: &str,
    args: &[&'a str],
    usage: &str,
) -> Result<[&'a str; N]> {
    <[&str; N]>::try_from(args).map_err(|_| {
        MarketError::MalformedCommand(format!(
            "{verb} expects {N} argument(s), got {}; usage: {verb} {usage}",
            args.len()
        ))
    })
}

fn parse_name(kind: &str, token: &str) -> Result<String> {
    if token.len() > MAX_NAME_BYTES {
        return Err(MarketError::MalformedCommand(format!(
            "{kind} name {} is longer than {MAX_NAME_BYTES} bytes",
            excerpt(token)
        )));
    }
    Ok(token.to_string())
}

fn parse_quantity(token: &str) -> Result<u32> {
    token
        .parse()
        .map_err(|_| MarketError::MalformedCommand(format!("invalid quantity: {}", excerpt(token))))
}

/// Renders a business error as a response line.
pub fn render_error(error: &MarketError) -> String {
    format!("{ERROR_MARKER}{error}")
}

/// Parses, executes and renders one command line.
///
/// Always produces response text: business errors are rendered with
/// [`ERROR_MARKER`] and never escape as failures.
pub async fn dispatch(market: &Marketplace, line: &str) -> String {
    let outcome = match Command::parse(line) {
        Ok(command) => command.execute(market).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!(error = %e, "Command rejected");
            render_error(&e)
        }
    }
}
