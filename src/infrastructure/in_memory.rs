use crate::domain::customer::{Customer, CustomerId};
use crate::domain::ports::{CustomerStore, ProductStore, SellerStore};
use crate::domain::product::{Product, ProductId};
use crate::domain::seller::{Seller, SellerId};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A record that can be kept in [`Records`].
trait Keyed {
    fn key(&self) -> u32;
    fn name(&self) -> &str;
}

impl Keyed for Seller {
    fn key(&self) -> u32 {
        self.id.0
    }
    fn name(&self) -> &str {
        &self.name
    }
}

impl Keyed for Customer {
    fn key(&self) -> u32 {
        self.id.0
    }
    fn name(&self) -> &str {
        &self.name
    }
}

impl Keyed for Product {
    fn key(&self) -> u32 {
        self.id.0
    }
    fn name(&self) -> &str {
        &self.name
    }
}

/// Insertion-ordered records with a key index and a name index.
///
/// The name index points at the first record stored under that name, so later
/// records with a duplicate name are never returned by name lookups.
struct Records<T> {
    items: Vec<T>,
    by_key: HashMap<u32, usize>,
    by_name: HashMap<String, usize>,
    last_key: u32,
}

impl<T> Default for Records<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            by_key: HashMap::new(),
            by_name: HashMap::new(),
            last_key: 0,
        }
    }
}

impl<T: Keyed + Clone> Records<T> {
    fn next_key(&mut self) -> u32 {
        self.last_key += 1;
        self.last_key
    }

    fn upsert(&mut self, record: T) {
        match self.by_key.get(&record.key()) {
            Some(&position) => self.items[position] = record,
            None => {
                let position = self.items.len();
                self.by_key.insert(record.key(), position);
                self.by_name
                    .entry(record.name().to_string())
                    .or_insert(position);
                self.items.push(record);
            }
        }
    }

    fn find_by_name(&self, name: &str) -> Option<T> {
        self.by_name
            .get(name)
            .map(|&position| self.items[position].clone())
    }

    fn all(&self) -> Vec<T> {
        self.items.clone()
    }
}

/// A thread-safe in-memory store for sellers.
///
/// Ids are handed out sequentially starting at 1 and never reused.
#[derive(Default, Clone)]
pub struct InMemorySellerStore {
    sellers: Arc<RwLock<Records<Seller>>>,
}

impl InMemorySellerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SellerStore for InMemorySellerStore {
    async fn next_id(&self) -> Result<SellerId> {
        Ok(SellerId(self.sellers.write().await.next_key()))
    }

    async fn store(&self, seller: Seller) -> Result<()> {
        self.sellers.write().await.upsert(seller);
        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Seller>> {
        Ok(self.sellers.read().await.find_by_name(name))
    }

    async fn all(&self) -> Result<Vec<Seller>> {
        Ok(self.sellers.read().await.all())
    }
}

/// A thread-safe in-memory store for customers.
#[derive(Default, Clone)]
pub struct InMemoryCustomerStore {
    customers: Arc<RwLock<Records<Customer>>>,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn next_id(&self) -> Result<CustomerId> {
        Ok(CustomerId(self.customers.write().await.next_key()))
    }

    async fn store(&self, customer: Customer) -> Result<()> {
        self.customers.write().await.upsert(customer);
        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Customer>> {
        Ok(self.customers.read().await.find_by_name(name))
    }

    async fn all(&self) -> Result<Vec<Customer>> {
        Ok(self.customers.read().await.all())
    }
}

/// A thread-safe in-memory store for products.
#[derive(Default, Clone)]
pub struct InMemoryProductStore {
    products: Arc<RwLock<Records<Product>>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn next_id(&self) -> Result<ProductId> {
        Ok(ProductId(self.products.write().await.next_key()))
    }

    async fn store(&self, product: Product) -> Result<()> {
        self.products.write().await.upsert(product);
        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>> {
        Ok(self.products.read().await.find_by_name(name))
    }

    async fn all(&self) -> Result<Vec<Product>> {
        Ok(self.products.read().await.all())
    }
}
