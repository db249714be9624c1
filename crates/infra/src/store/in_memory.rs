//! In-memory collaborators for tests/dev.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;

use storefront_core::{
    CustomerId, Entity, OrderId, ProductId, RepositoryError, RepositoryResult,
};
use storefront_customers::{Customer, CustomerDirectory};
use storefront_products::{CatalogProduct, ProductCatalog, StockDecrement};
use storefront_sales::{NewOrder, Order, OrderStore};

/// Records keyed by their entity id behind a `RwLock`.
#[derive(Debug)]
struct EntityMap<E: Entity> {
    inner: RwLock<HashMap<E::Id, E>>,
}

impl<E: Entity + Clone> EntityMap<E> {
    fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> RepositoryResult<RwLockReadGuard<'_, HashMap<E::Id, E>>> {
        self.inner
            .read()
            .map_err(|_| RepositoryError::unavailable("in-memory store lock poisoned"))
    }

    fn write(&self) -> RepositoryResult<RwLockWriteGuard<'_, HashMap<E::Id, E>>> {
        self.inner
            .write()
            .map_err(|_| RepositoryError::unavailable("in-memory store lock poisoned"))
    }

    fn upsert(&self, record: E) -> RepositoryResult<()> {
        self.write()?.insert(record.id().clone(), record);
        Ok(())
    }

    fn get(&self, id: &E::Id) -> RepositoryResult<Option<E>> {
        Ok(self.read()?.get(id).cloned())
    }

    fn list(&self) -> RepositoryResult<Vec<E>> {
        Ok(self.read()?.values().cloned().collect())
    }
}

/// In-memory customer directory.
#[derive(Debug)]
pub struct InMemoryCustomerDirectory {
    customers: EntityMap<Customer>,
}

impl InMemoryCustomerDirectory {
    pub fn new() -> Self {
        Self {
            customers: EntityMap::new(),
        }
    }

    /// Add or replace a customer record.
    pub fn insert(&self, customer: Customer) -> RepositoryResult<()> {
        self.customers.upsert(customer)
    }
}

impl Default for InMemoryCustomerDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CustomerDirectory for InMemoryCustomerDirectory {
    async fn find_by_id(&self, id: &CustomerId) -> RepositoryResult<Option<Customer>> {
        self.customers.get(id)
    }
}

/// In-memory product catalog.
///
/// Decrements saturate at zero and ignore unknown product ids.
#[derive(Debug)]
pub struct InMemoryProductCatalog {
    products: EntityMap<CatalogProduct>,
}

impl InMemoryProductCatalog {
    pub fn new() -> Self {
        Self {
            products: EntityMap::new(),
        }
    }

    /// Add or replace a product record.
    pub fn insert(&self, product: CatalogProduct) -> RepositoryResult<()> {
        self.products.upsert(product)
    }

    pub fn get(&self, id: &ProductId) -> RepositoryResult<Option<CatalogProduct>> {
        self.products.get(id)
    }
}

impl Default for InMemoryProductCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductCatalog for InMemoryProductCatalog {
    async fn find_all_by_id(&self, ids: &[ProductId]) -> RepositoryResult<Vec<CatalogProduct>> {
        let map = self.products.read()?;
        Ok(ids.iter().filter_map(|id| map.get(id).cloned()).collect())
    }

    async fn update_quantity(&self, decrements: &[StockDecrement]) -> RepositoryResult<()> {
        let mut map = self.products.write()?;
        for d in decrements {
            match map.get_mut(&d.product_id) {
                Some(product) => *product = product.decremented(d.quantity),
                None => tracing::debug!(product_id = %d.product_id, "decrement for unknown product ignored"),
            }
        }
        Ok(())
    }
}

/// In-memory order store. Assigns UUIDv7 ids and the current time.
#[derive(Debug)]
pub struct InMemoryOrderStore {
    orders: EntityMap<Order>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self {
            orders: EntityMap::new(),
        }
    }

    pub fn get(&self, id: &OrderId) -> RepositoryResult<Option<Order>> {
        self.orders.get(id)
    }

    /// All stored orders, oldest first.
    pub fn list(&self) -> RepositoryResult<Vec<Order>> {
        let mut orders = self.orders.list()?;
        orders.sort_by_key(|o| (o.created_at(), o.id_typed().to_string()));
        Ok(orders)
    }
}

impl Default for InMemoryOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create(&self, order: NewOrder) -> RepositoryResult<Order> {
        let stored = Order::from_new(OrderId::new(), order, Utc::now());
        self.orders.upsert(stored.clone())?;
        tracing::debug!(order_id = %stored.id(), "order stored in memory");
        Ok(stored)
    }
}
