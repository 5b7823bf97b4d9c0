use std::str::FromStr;

use async_trait::async_trait;
use domain::{
    Customer, CustomerId, Entity, Order, OrderId, OrderItem, OrderItemId, Product, ProductId,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, Sqlite, SqlitePool, Transaction};

use crate::{
    CustomerRecord, OrderItemRecord, OrderRecord, ProductRecord, RepositoryError, Result,
    store::Repository,
};

/// Opens a SQLite connection pool with foreign keys enforced.
///
/// In-memory databases live per connection, so callers pass
/// `max_connections = 1` for `sqlite::memory:`. Idle connections are never
/// reaped, which keeps an in-memory database alive for the pool's lifetime.
pub async fn connect(url: &str, max_connections: u32) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Runs the schema migrations against `pool`.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}

fn record_operation(entity: &'static str, operation: &'static str) {
    metrics::counter!(
        "repository_operations_total",
        "entity" => entity,
        "operation" => operation
    )
    .increment(1);
}

/// Maps a unique-key violation on insert to `AlreadyExists`.
fn insert_error<E: Entity>(err: sqlx::Error, id: &E::Id) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_unique_violation()
    {
        return RepositoryError::already_exists::<E>(id);
    }
    RepositoryError::Database(err)
}

/// SQLite-backed order repository.
///
/// An order is stored as one `orders` row plus one `order_items` row per
/// item. Writes go through a single transaction; reads load the order and
/// its items with one joined query.
#[derive(Clone)]
pub struct SqliteOrderRepository {
    pool: SqlitePool,
}

impl SqliteOrderRepository {
    /// Creates a new SQLite order repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn insert_items(
        tx: &mut Transaction<'_, Sqlite>,
        items: &[OrderItemRecord],
    ) -> Result<()> {
        for item in items {
            sqlx::query(
                r#"
                INSERT INTO order_items (id, order_id, product_id, name, price, quantity)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&item.id)
            .bind(&item.order_id)
            .bind(&item.product_id)
            .bind(&item.name)
            .bind(item.price)
            .bind(item.quantity)
            .execute(&mut **tx)
            .await
            .map_err(|e| insert_error::<OrderItem>(e, &OrderItemId::new(item.id.as_str())))?;
        }
        Ok(())
    }

    fn row_to_order(row: &SqliteRow) -> Result<OrderRecord> {
        Ok(OrderRecord {
            id: row.try_get("id")?,
            customer_id: row.try_get("customer_id")?,
            total: row.try_get("total")?,
        })
    }

    /// Reads the item half of a joined row; `None` for an order without items.
    fn row_to_item(row: &SqliteRow) -> Result<Option<OrderItemRecord>> {
        let item_id: Option<String> = row.try_get("item_id")?;
        let Some(item_id) = item_id else {
            return Ok(None);
        };
        Ok(Some(OrderItemRecord {
            id: item_id,
            order_id: row.try_get("id")?,
            product_id: row.try_get("product_id")?,
            name: row.try_get("name")?,
            price: row.try_get("price")?,
            quantity: row.try_get("quantity")?,
        }))
    }

    /// Folds joined rows (grouped by order) into aggregates.
    fn rows_to_orders(rows: Vec<SqliteRow>) -> Result<Vec<Order>> {
        let mut grouped: Vec<(OrderRecord, Vec<OrderItemRecord>)> = Vec::new();

        for row in &rows {
            let record = Self::row_to_order(row)?;
            let item = Self::row_to_item(row)?;

            match grouped.last_mut() {
                Some((open, items)) if open.id == record.id => items.extend(item),
                _ => grouped.push((record, item.into_iter().collect())),
            }
        }

        grouped
            .into_iter()
            .map(|(record, items)| record.into_order(items))
            .collect()
    }
}

const SELECT_ORDERS_WITH_ITEMS: &str = r#"
    SELECT o.id, o.customer_id, o.total,
           i.id AS item_id, i.product_id, i.name, i.price, i.quantity
    FROM orders o
    LEFT JOIN order_items i ON i.order_id = o.id
"#;

#[async_trait]
impl Repository<Order> for SqliteOrderRepository {
    #[tracing::instrument(skip(self, order), fields(order_id = %order.id()))]
    async fn create(&self, order: &Order) -> Result<()> {
        record_operation("order", "create");
        let (record, items) = OrderRecord::from_order(order);

        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO orders (id, customer_id, total) VALUES (?, ?, ?)")
            .bind(&record.id)
            .bind(&record.customer_id)
            .bind(record.total)
            .execute(&mut *tx)
            .await
            .map_err(|e| insert_error::<Order>(e, order.id()))?;

        Self::insert_items(&mut tx, &items).await?;

        tx.commit().await?;
        tracing::debug!(item_count = items.len(), "order created");
        Ok(())
    }

    #[tracing::instrument(skip(self, order), fields(order_id = %order.id()))]
    async fn update(&self, order: &Order) -> Result<()> {
        record_operation("order", "update");
        let (record, items) = OrderRecord::from_order(order);

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("UPDATE orders SET customer_id = ?, total = ? WHERE id = ?")
            .bind(&record.customer_id)
            .bind(record.total)
            .bind(&record.id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found::<Order>(order.id()));
        }

        sqlx::query("DELETE FROM order_items WHERE order_id = ?")
            .bind(&record.id)
            .execute(&mut *tx)
            .await?;

        Self::insert_items(&mut tx, &items).await?;

        tx.commit().await?;
        tracing::debug!(item_count = items.len(), "order updated");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn find(&self, id: &OrderId) -> Result<Order> {
        record_operation("order", "find");
        let sql = format!("{SELECT_ORDERS_WITH_ITEMS} WHERE o.id = ? ORDER BY i.rowid ASC");
        let rows = sqlx::query(&sql)
            .bind(id.as_str())
            .fetch_all(&self.pool)
            .await?;

        Self::rows_to_orders(rows)?
            .pop()
            .ok_or_else(|| RepositoryError::not_found::<Order>(id))
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Order>> {
        record_operation("order", "find_all");
        let sql = format!("{SELECT_ORDERS_WITH_ITEMS} ORDER BY o.id ASC, i.rowid ASC");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        Self::rows_to_orders(rows)
    }
}

/// SQLite-backed customer repository.
#[derive(Clone)]
pub struct SqliteCustomerRepository {
    pool: SqlitePool,
}

impl SqliteCustomerRepository {
    /// Creates a new SQLite customer repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_customer(row: SqliteRow) -> Result<Customer> {
        CustomerRecord {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            street: row.try_get("street")?,
            number: row.try_get("number")?,
            zipcode: row.try_get("zipcode")?,
            city: row.try_get("city")?,
            active: row.try_get("active")?,
            reward_points: row.try_get("reward_points")?,
        }
        .into_customer()
    }
}

#[async_trait]
impl Repository<Customer> for SqliteCustomerRepository {
    #[tracing::instrument(skip(self, customer), fields(customer_id = %customer.id()))]
    async fn create(&self, customer: &Customer) -> Result<()> {
        record_operation("customer", "create");
        let record = CustomerRecord::from_customer(customer)?;

        sqlx::query(
            r#"
            INSERT INTO customers (id, name, street, number, zipcode, city, active, reward_points)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.name)
        .bind(&record.street)
        .bind(record.number)
        .bind(&record.zipcode)
        .bind(&record.city)
        .bind(record.active)
        .bind(record.reward_points)
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error::<Customer>(e, customer.id()))?;

        Ok(())
    }

    #[tracing::instrument(skip(self, customer), fields(customer_id = %customer.id()))]
    async fn update(&self, customer: &Customer) -> Result<()> {
        record_operation("customer", "update");
        let record = CustomerRecord::from_customer(customer)?;

        let result = sqlx::query(
            r#"
            UPDATE customers
            SET name = ?, street = ?, number = ?, zipcode = ?, city = ?, active = ?, reward_points = ?
            WHERE id = ?
            "#,
        )
        .bind(&record.name)
        .bind(&record.street)
        .bind(record.number)
        .bind(&record.zipcode)
        .bind(&record.city)
        .bind(record.active)
        .bind(record.reward_points)
        .bind(&record.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found::<Customer>(customer.id()));
        }
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn find(&self, id: &CustomerId) -> Result<Customer> {
        record_operation("customer", "find");
        let row: Option<SqliteRow> = sqlx::query(
            r#"
            SELECT id, name, street, number, zipcode, city, active, reward_points
            FROM customers
            WHERE id = ?
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Self::row_to_customer(row),
            None => Err(RepositoryError::not_found::<Customer>(id)),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Customer>> {
        record_operation("customer", "find_all");
        let rows = sqlx::query(
            r#"
            SELECT id, name, street, number, zipcode, city, active, reward_points
            FROM customers
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_customer).collect()
    }
}

/// SQLite-backed product repository.
#[derive(Clone)]
pub struct SqliteProductRepository {
    pool: SqlitePool,
}

impl SqliteProductRepository {
    /// Creates a new SQLite product repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_product(row: SqliteRow) -> Result<Product> {
        ProductRecord {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            price: row.try_get("price")?,
        }
        .into_product()
    }
}

#[async_trait]
impl Repository<Product> for SqliteProductRepository {
    #[tracing::instrument(skip(self, product), fields(product_id = %product.id()))]
    async fn create(&self, product: &Product) -> Result<()> {
        record_operation("product", "create");
        let record = ProductRecord::from_product(product);

        sqlx::query("INSERT INTO products (id, name, price) VALUES (?, ?, ?)")
            .bind(&record.id)
            .bind(&record.name)
            .bind(record.price)
            .execute(&self.pool)
            .await
            .map_err(|e| insert_error::<Product>(e, product.id()))?;

        Ok(())
    }

    #[tracing::instrument(skip(self, product), fields(product_id = %product.id()))]
    async fn update(&self, product: &Product) -> Result<()> {
        record_operation("product", "update");
        let record = ProductRecord::from_product(product);

        let result = sqlx::query("UPDATE products SET name = ?, price = ? WHERE id = ?")
            .bind(&record.name)
            .bind(record.price)
            .bind(&record.id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found::<Product>(product.id()));
        }
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn find(&self, id: &ProductId) -> Result<Product> {
        record_operation("product", "find");
        let row: Option<SqliteRow> =
            sqlx::query("SELECT id, name, price FROM products WHERE id = ?")
                .bind(id.as_str())
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some(row) => Self::row_to_product(row),
            None => Err(RepositoryError::not_found::<Product>(id)),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Product>> {
        record_operation("product", "find_all");
        let rows = sqlx::query("SELECT id, name, price FROM products ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Self::row_to_product).collect()
    }
}
