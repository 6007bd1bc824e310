use super::customer::{Customer, CustomerId};
use super::product::{Product, ProductId};
use super::seller::{Seller, SellerId};
use crate::error::Result;
use async_trait::async_trait;

/// Storage for sellers.
///
/// `find_by_name` is an exact, case-sensitive match; when several sellers share a
/// name the first one registered wins. `all` returns records in insertion order.
#[async_trait]
pub trait SellerStore: Send + Sync {
    async fn next_id(&self) -> Result<SellerId>;
    async fn store(&self, seller: Seller) -> Result<()>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Seller>>;
    async fn all(&self) -> Result<Vec<Seller>>;
}

/// Storage for customers. Same lookup rules as [`SellerStore`].
#[async_trait]
pub trait CustomerStore: Send + Sync {
    async fn next_id(&self) -> Result<CustomerId>;
    /// Inserts a new customer, or replaces the one with the same id in place.
    async fn store(&self, customer: Customer) -> Result<()>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Customer>>;
    async fn all(&self) -> Result<Vec<Customer>>;
}

/// Storage for products. Product names are global, not scoped by seller.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn next_id(&self) -> Result<ProductId>;
    /// Inserts a new product, or replaces the one with the same id in place.
    async fn store(&self, product: Product) -> Result<()>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Product>>;
    async fn all(&self) -> Result<Vec<Product>>;
}

pub type SellerStoreBox = Box<dyn SellerStore>;
pub type CustomerStoreBox = Box<dyn CustomerStore>;
pub type ProductStoreBox = Box<dyn ProductStore>;
