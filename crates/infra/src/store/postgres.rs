//! Postgres-backed collaborators.
//!
//! All three share one `PgPool`. Identifiers of customers and products are
//! stored as `TEXT`; order ids are UUIDs assigned here.
//!
//! ## Stock decrements
//!
//! Each decrement is a single `UPDATE` that clamps at zero, so the catalog
//! never goes negative even when two orders race for the last unit. The
//! availability check performed by the workflow is not repeated here.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Row, postgres::PgRow};

use storefront_core::{
    CustomerId, Entity, OrderId, ProductId, RepositoryError, RepositoryResult,
};
use storefront_customers::{Customer, CustomerDirectory};
use storefront_products::{CatalogProduct, ProductCatalog, StockDecrement};
use storefront_sales::{NewOrder, Order, OrderStore};

/// Table layout expected by the Postgres collaborators.
pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS customers (
    id         TEXT PRIMARY KEY,
    name       TEXT NOT NULL,
    email      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS products (
    id         TEXT PRIMARY KEY,
    name       TEXT NOT NULL,
    price      NUMERIC(12, 2) NOT NULL CHECK (price >= 0),
    quantity   BIGINT NOT NULL CHECK (quantity >= 0)
);

CREATE TABLE IF NOT EXISTS orders (
    id          UUID PRIMARY KEY,
    customer_id TEXT NOT NULL REFERENCES customers (id),
    created_at  TIMESTAMPTZ NOT NULL
);

CREATE TABLE IF NOT EXISTS order_line_items (
    order_id    UUID NOT NULL REFERENCES orders (id),
    line_no     INTEGER NOT NULL,
    product_id  TEXT NOT NULL REFERENCES products (id),
    unit_price  NUMERIC(12, 2) NOT NULL,
    quantity    BIGINT NOT NULL,
    PRIMARY KEY (order_id, line_no)
);
"#;

/// Create the tables if they do not exist yet.
pub async fn run_migrations(pool: &PgPool) -> RepositoryResult<()> {
    sqlx::raw_sql(MIGRATION_SQL)
        .execute(pool)
        .await
        .map_err(|e| map_sqlx_error("run_migrations", e))?;
    Ok(())
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            RepositoryError::unavailable(format!("{operation}: {err}"))
        }
        sqlx::Error::ColumnNotFound(_) | sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            RepositoryError::decode(format!("{operation}: {err}"))
        }
        other => RepositoryError::storage(format!("{operation}: {other}")),
    }
}

fn customer_from_row(row: &PgRow) -> RepositoryResult<Customer> {
    let id: String = row
        .try_get("id")
        .map_err(|e| map_sqlx_error("decode_customer", e))?;
    let name: String = row
        .try_get("name")
        .map_err(|e| map_sqlx_error("decode_customer", e))?;
    let email: String = row
        .try_get("email")
        .map_err(|e| map_sqlx_error("decode_customer", e))?;

    let id = CustomerId::new(id).map_err(|e| RepositoryError::decode(e.to_string()))?;
    Ok(Customer::from_parts(id, name, email))
}

fn product_from_row(row: &PgRow) -> RepositoryResult<CatalogProduct> {
    let id: String = row
        .try_get("id")
        .map_err(|e| map_sqlx_error("decode_product", e))?;
    let name: String = row
        .try_get("name")
        .map_err(|e| map_sqlx_error("decode_product", e))?;
    let price: Decimal = row
        .try_get("price")
        .map_err(|e| map_sqlx_error("decode_product", e))?;
    let quantity: i64 = row
        .try_get("quantity")
        .map_err(|e| map_sqlx_error("decode_product", e))?;

    let available = u32::try_from(quantity)
        .map_err(|_| RepositoryError::decode(format!("product {id}: quantity {quantity} out of range")))?;
    let id = ProductId::new(id).map_err(|e| RepositoryError::decode(e.to_string()))?;
    Ok(CatalogProduct::from_parts(id, name, price, available))
}

/// Customer directory over the `customers` table.
#[derive(Debug, Clone)]
pub struct PostgresCustomerDirectory {
    pool: Arc<PgPool>,
}

impl PostgresCustomerDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

#[async_trait]
impl CustomerDirectory for PostgresCustomerDirectory {
    async fn find_by_id(&self, id: &CustomerId) -> RepositoryResult<Option<Customer>> {
        let row = sqlx::query("SELECT id, name, email FROM customers WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_customer", e))?;

        row.as_ref().map(customer_from_row).transpose()
    }
}

/// Product catalog over the `products` table.
#[derive(Debug, Clone)]
pub struct PostgresProductCatalog {
    pool: Arc<PgPool>,
}

impl PostgresProductCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

#[async_trait]
impl ProductCatalog for PostgresProductCatalog {
    async fn find_all_by_id(&self, ids: &[ProductId]) -> RepositoryResult<Vec<CatalogProduct>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = ids.iter().map(|id| id.as_str().to_owned()).collect();
        let rows = sqlx::query("SELECT id, name, price, quantity FROM products WHERE id = ANY($1)")
            .bind(&ids)
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_products", e))?;

        tracing::debug!(requested = ids.len(), found = rows.len(), "loaded catalog products");

        rows.iter().map(product_from_row).collect()
    }

    async fn update_quantity(&self, decrements: &[StockDecrement]) -> RepositoryResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_update_quantity", e))?;

        for d in decrements {
            sqlx::query("UPDATE products SET quantity = GREATEST(quantity - $2, 0) WHERE id = $1")
                .bind(d.product_id.as_str())
                .bind(i64::from(d.quantity))
                .execute(&mut *tx)
                .await
                .map_err(|e| map_sqlx_error("update_quantity", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit_update_quantity", e))?;
        Ok(())
    }
}

/// Order store over the `orders` and `order_line_items` tables.
#[derive(Debug, Clone)]
pub struct PostgresOrderStore {
    pool: Arc<PgPool>,
}

impl PostgresOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

#[async_trait]
impl OrderStore for PostgresOrderStore {
    async fn create(&self, order: NewOrder) -> RepositoryResult<Order> {
        let order_id = OrderId::new();
        // Postgres keeps microseconds; match it so the returned order equals a re-read.
        let created_at = Utc::now().trunc_subsecs(6);

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_create_order", e))?;

        sqlx::query("INSERT INTO orders (id, customer_id, created_at) VALUES ($1, $2, $3)")
            .bind(order_id.as_uuid())
            .bind(order.customer.id().as_str())
            .bind(created_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("insert_order", e))?;

        for (idx, line) in order.line_items.iter().enumerate() {
            let line_no = i32::try_from(idx + 1)
                .map_err(|_| RepositoryError::storage("too many order lines"))?;

            sqlx::query(
                r#"
                INSERT INTO order_line_items (order_id, line_no, product_id, unit_price, quantity)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(order_id.as_uuid())
            .bind(line_no)
            .bind(line.product_id.as_str())
            .bind(line.unit_price)
            .bind(i64::from(line.quantity))
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("insert_order_line", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit_create_order", e))?;

        tracing::debug!(order_id = %order_id, lines = order.line_items.len(), "order stored");

        Ok(Order::from_new(order_id, order, created_at))
    }
}
