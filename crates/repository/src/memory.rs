use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use domain::{
    Customer, CustomerId, Entity, Order, OrderId, OrderItem, OrderItemId, Product, ProductId,
};
use tokio::sync::RwLock;

use crate::{
    CustomerRecord, OrderItemRecord, OrderRecord, ProductRecord, RepositoryError, Result,
    store::Repository,
};

#[derive(Default)]
struct OrderTables {
    orders: BTreeMap<String, OrderRecord>,
    /// Item rows in insertion order, across all orders.
    items: Vec<OrderItemRecord>,
}

impl OrderTables {
    fn items_of(&self, order_id: &str) -> Vec<OrderItemRecord> {
        self.items
            .iter()
            .filter(|item| item.order_id == order_id)
            .cloned()
            .collect()
    }

    /// Simulates the primary key on `order_items.id`.
    fn check_item_ids(&self, items: &[OrderItemRecord]) -> Result<()> {
        for (i, item) in items.iter().enumerate() {
            let taken = self
                .items
                .iter()
                .chain(&items[..i])
                .any(|existing| existing.id == item.id);
            if taken {
                return Err(RepositoryError::already_exists::<OrderItem>(
                    &OrderItemId::new(item.id.as_str()),
                ));
            }
        }
        Ok(())
    }
}

/// In-memory order repository for testing.
///
/// Stores the same parent/child records the SQLite backend writes, so
/// aggregates go through the full record mapping on every call.
///
/// Only id uniqueness is enforced. Referential integrity is not simulated:
/// orders naming unknown customers or products are accepted here, whereas
/// [`SqliteOrderRepository`](crate::SqliteOrderRepository) rejects them
/// through its foreign keys.
#[derive(Clone, Default)]
pub struct InMemoryOrderRepository {
    tables: Arc<RwLock<OrderTables>>,
}

impl InMemoryOrderRepository {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored orders.
    pub async fn order_count(&self) -> usize {
        self.tables.read().await.orders.len()
    }

    /// Returns the stored item rows of an order, in insertion order.
    pub async fn item_records(&self, order_id: &str) -> Vec<OrderItemRecord> {
        self.tables.read().await.items_of(order_id)
    }

    /// Clears all orders and items.
    pub async fn clear(&self) {
        let mut tables = self.tables.write().await;
        tables.orders.clear();
        tables.items.clear();
    }
}

#[async_trait]
impl Repository<Order> for InMemoryOrderRepository {
    async fn create(&self, order: &Order) -> Result<()> {
        let (record, items) = OrderRecord::from_order(order);
        let mut tables = self.tables.write().await;

        if tables.orders.contains_key(&record.id) {
            return Err(RepositoryError::already_exists::<Order>(order.id()));
        }
        tables.check_item_ids(&items)?;

        tables.orders.insert(record.id.clone(), record);
        tables.items.extend(items);
        Ok(())
    }

    async fn update(&self, order: &Order) -> Result<()> {
        let (record, items) = OrderRecord::from_order(order);
        let mut tables = self.tables.write().await;

        if !tables.orders.contains_key(&record.id) {
            return Err(RepositoryError::not_found::<Order>(order.id()));
        }

        let previous = std::mem::take(&mut tables.items);
        let (own, others): (Vec<_>, Vec<_>) = previous
            .into_iter()
            .partition(|item| item.order_id == record.id);
        tables.items = others;

        if let Err(e) = tables.check_item_ids(&items) {
            tables.items.extend(own);
            return Err(e);
        }

        tables.items.extend(items);
        tables.orders.insert(record.id.clone(), record);
        Ok(())
    }

    async fn find(&self, id: &OrderId) -> Result<Order> {
        let tables = self.tables.read().await;
        let record = tables
            .orders
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| RepositoryError::not_found::<Order>(id))?;
        let items = tables.items_of(&record.id);
        record.into_order(items)
    }

    async fn find_all(&self) -> Result<Vec<Order>> {
        let tables = self.tables.read().await;
        tables
            .orders
            .values()
            .map(|record| {
                let items = tables.items_of(&record.id);
                record.clone().into_order(items)
            })
            .collect()
    }
}

/// In-memory customer repository for testing.
#[derive(Clone, Default)]
pub struct InMemoryCustomerRepository {
    records: Arc<RwLock<BTreeMap<String, CustomerRecord>>>,
}

impl InMemoryCustomerRepository {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored customers.
    pub async fn customer_count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl Repository<Customer> for InMemoryCustomerRepository {
    async fn create(&self, customer: &Customer) -> Result<()> {
        let record = CustomerRecord::from_customer(customer)?;
        let mut records = self.records.write().await;
        if records.contains_key(&record.id) {
            return Err(RepositoryError::already_exists::<Customer>(customer.id()));
        }
        records.insert(record.id.clone(), record);
        Ok(())
    }

    async fn update(&self, customer: &Customer) -> Result<()> {
        let record = CustomerRecord::from_customer(customer)?;
        let mut records = self.records.write().await;
        match records.get_mut(&record.id) {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(RepositoryError::not_found::<Customer>(customer.id())),
        }
    }

    async fn find(&self, id: &CustomerId) -> Result<Customer> {
        let records = self.records.read().await;
        records
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| RepositoryError::not_found::<Customer>(id))?
            .into_customer()
    }

    async fn find_all(&self) -> Result<Vec<Customer>> {
        let records = self.records.read().await;
        records
            .values()
            .cloned()
            .map(CustomerRecord::into_customer)
            .collect()
    }
}

/// In-memory product repository for testing.
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    records: Arc<RwLock<BTreeMap<String, ProductRecord>>>,
}

impl InMemoryProductRepository {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored products.
    pub async fn product_count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl Repository<Product> for InMemoryProductRepository {
    async fn create(&self, product: &Product) -> Result<()> {
        let record = ProductRecord::from_product(product);
        let mut records = self.records.write().await;
        if records.contains_key(&record.id) {
            return Err(RepositoryError::already_exists::<Product>(product.id()));
        }
        records.insert(record.id.clone(), record);
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<()> {
        let record = ProductRecord::from_product(product);
        let mut records = self.records.write().await;
        match records.get_mut(&record.id) {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(RepositoryError::not_found::<Product>(product.id())),
        }
    }

    async fn find(&self, id: &ProductId) -> Result<Product> {
        let records = self.records.read().await;
        records
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| RepositoryError::not_found::<Product>(id))?
            .into_product()
    }

    async fn find_all(&self) -> Result<Vec<Product>> {
        let records = self.records.read().await;
        records
            .values()
            .cloned()
            .map(ProductRecord::into_product)
            .collect()
    }
}
