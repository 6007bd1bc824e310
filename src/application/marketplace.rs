use crate::domain::customer::Customer;
use crate::domain::money::{Balance, Price};
use crate::domain::payment::PaymentMethod;
use crate::domain::ports::{CustomerStoreBox, ProductStoreBox, SellerStoreBox};
use crate::domain::product::Product;
use crate::domain::receipt::Receipt;
use crate::domain::seller::{Seller, SellerId};
use crate::error::{MarketError, Result};
use crate::infrastructure::in_memory::{
    InMemoryCustomerStore, InMemoryProductStore, InMemorySellerStore,
};
use serde::Serialize;
use std::fmt;

/// The marketplace state machine.
///
/// `Marketplace` owns the seller, customer and product stores and exposes the
/// transactional operations on them. It does no locking of its own across
/// operations: callers that share one instance between connections must
/// serialize access (see [`crate::interfaces::tcp::server`]).
pub struct Marketplace {
    sellers: SellerStoreBox,
    customers: CustomerStoreBox,
    products: ProductStoreBox,
}

impl Default for Marketplace {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl Marketplace {
    /// Creates a marketplace over the given stores.
    pub fn new(
        sellers: SellerStoreBox,
        customers: CustomerStoreBox,
        products: ProductStoreBox,
    ) -> Self {
        Self {
            sellers,
            customers,
            products,
        }
    }

    /// Creates an empty marketplace backed by in-memory stores.
    pub fn in_memory() -> Self {
        Self::new(
            Box::new(InMemorySellerStore::new()),
            Box::new(InMemoryCustomerStore::new()),
            Box::new(InMemoryProductStore::new()),
        )
    }

    /// Registers a seller under the next sequential id.
    pub async fn add_seller(&self, name: &str) -> Result<SellerId> {
        let id = self.sellers.next_id().await?;
        self.sellers.store(Seller::new(id, name)).await?;
        Ok(id)
    }

    /// Registers a customer. The starting balance is taken as given.
    pub async fn add_customer(&self, name: &str, balance: Balance) -> Result<()> {
        let id = self.customers.next_id().await?;
        self.customers
            .store(Customer::new(id, name, balance))
            .await
    }

    /// Lists a product on behalf of the first seller named `seller_name`.
    pub async fn add_product(
        &self,
        seller_name: &str,
        product_name: &str,
        price: Price,
        quantity: u32,
    ) -> Result<SellerId> {
        let seller = self
            .sellers
            .find_by_name(seller_name)
            .await?
            .ok_or_else(|| MarketError::SellerNotFound(seller_name.to_string()))?;

        let id = self.products.next_id().await?;
        self.products
            .store(Product::new(id, product_name, price, quantity, seller.id))
            .await?;
        Ok(seller.id)
    }

    /// All products in the order they were listed.
    pub async fn list_products(&self) -> Result<ProductListing> {
        Ok(ProductListing(self.products.all().await?))
    }

    /// Executes a purchase.
    ///
    /// Every check runs before any mutation, so a failed purchase leaves the
    /// marketplace exactly as it was. The product is resolved by name alone:
    /// with duplicate names across sellers the first listing is used.
    pub async fn buy_product(
        &self,
        customer_name: &str,
        product_name: &str,
        quantity: u32,
        payment_method: Option<PaymentMethod>,
    ) -> Result<Receipt> {
        let mut customer = self
            .customers
            .find_by_name(customer_name)
            .await?
            .ok_or_else(|| MarketError::CustomerNotFound(customer_name.to_string()))?;

        let mut product = self
            .products
            .find_by_name(product_name)
            .await?
            .ok_or_else(|| MarketError::ProductNotFound(product_name.to_string()))?;

        product.ensure_in_stock(quantity)?;

        let total = product
            .cost_of(quantity)
            .ok_or(MarketError::TotalOverflow {
                quantity,
                available: customer.balance,
            })?;
        customer.ensure_can_afford(total)?;

        let payment_method = payment_method.ok_or(MarketError::NoPaymentMethodSelected)?;
        payment_method.apply(total);

        customer.debit(total)?;
        product.take(quantity)?;

        let receipt = Receipt {
            product: product.name.clone(),
            quantity,
            total,
            payment_method,
            remaining_balance: customer.balance,
        };

        self.customers.store(customer).await?;
        self.products.store(product).await?;

        Ok(receipt)
    }

    /// A copy of the full marketplace state, in insertion order.
    pub async fn snapshot(&self) -> Result<MarketSnapshot> {
        Ok(MarketSnapshot {
            sellers: self.sellers.all().await?,
            customers: self.customers.all().await?,
            products: self.products.all().await?,
        })
    }
}

/// Product listing as returned by [`Marketplace::list_products`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProductListing(pub Vec<Product>);

impl fmt::Display for ProductListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Available products:")?;
        for product in &self.0 {
            write!(
                f,
                "\nName: {}, Price: {}, Quantity: {}",
                product.name, product.price, product.quantity
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketSnapshot {
    pub sellers: Vec<Seller>,
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
}
