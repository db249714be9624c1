//! End-to-end order creation over the in-memory collaborators.
//!
//! Tests: AppServices → CreateOrderService → directory / catalog / store
//!
//! Verifies:
//! - Successful orders snapshot prices and decrement stock per requested item
//! - Rejections leave stock and stored orders untouched

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::Decimal;

    use storefront_core::{CustomerId, Entity, OrderId, ProductId};
    use storefront_customers::Customer;
    use storefront_products::CatalogProduct;
    use storefront_sales::{OrderError, OrderLineItem, OrderRequest, RequestedItem};

    use crate::config::{DATABASE_URL, StoreBackend, StoreConfig};
    use crate::services::AppServices;
    use crate::store::{InMemoryOrderStore, InMemoryProductCatalog};

    fn cid(s: &str) -> CustomerId {
        CustomerId::new(s).unwrap()
    }

    fn pid(s: &str) -> ProductId {
        ProductId::new(s).unwrap()
    }

    fn request(items: &[(&str, u32)]) -> OrderRequest {
        OrderRequest::new(
            cid("C1"),
            items
                .iter()
                .map(|(p, q)| RequestedItem {
                    product_id: pid(p),
                    quantity: *q,
                })
                .collect(),
        )
    }

    /// In-memory services with customer C1 and product P1 (price 10.0).
    fn setup(p1_stock: u32) -> (AppServices, Arc<InMemoryProductCatalog>, Arc<InMemoryOrderStore>) {
        let services = AppServices::in_memory();
        let AppServices::InMemory {
            customers,
            products,
            orders,
            ..
        } = &services
        else {
            panic!("expected in-memory services");
        };

        customers
            .insert(Customer::new(cid("C1"), "Ada", "ada@example.com").unwrap())
            .unwrap();
        products
            .insert(CatalogProduct::new(pid("P1"), "Widget", Decimal::new(100, 1), p1_stock).unwrap())
            .unwrap();

        let products = products.clone();
        let orders = orders.clone();
        (services, products, orders)
    }

    fn stock(products: &InMemoryProductCatalog, id: &str) -> u32 {
        products.get(&pid(id)).unwrap().unwrap().available_quantity()
    }

    #[tokio::test]
    async fn scenario_single_item_order_succeeds() {
        let (services, products, orders) = setup(5);

        let order = services.create_order(request(&[("P1", 2)])).await.unwrap();

        assert_eq!(
            order.line_items(),
            &[OrderLineItem {
                product_id: pid("P1"),
                unit_price: Decimal::new(100, 1),
                quantity: 2,
            }]
        );
        assert_eq!(stock(&products, "P1"), 3);
        assert_eq!(orders.list().unwrap(), vec![order]);
    }

    #[tokio::test]
    async fn scenario_unknown_customer_is_bad_request() {
        let (services, products, orders) = setup(5);

        let err = services
            .create_order(OrderRequest::new(cid("C404"), request(&[("P1", 1)]).items))
            .await
            .unwrap_err();

        assert_eq!(err, OrderError::CustomerNotFound);
        assert_eq!(err.status_code(), 400);
        assert_eq!(stock(&products, "P1"), 5);
        assert!(orders.list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn scenario_insufficient_stock_creates_nothing() {
        let (services, products, orders) = setup(1);

        let err = services.create_order(request(&[("P1", 2)])).await.unwrap_err();

        assert!(matches!(err, OrderError::InsufficientStock { requested: 2, available: 1, .. }));
        assert_eq!(err.status_code(), 400);
        assert_eq!(stock(&products, "P1"), 1);
        assert!(orders.list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn scenario_duplicate_items_are_kept_apart() {
        let (services, products, _orders) = setup(5);

        let order = services
            .create_order(request(&[("P1", 1), ("P1", 1)]))
            .await
            .unwrap();

        assert_eq!(order.line_items().len(), 2);
        assert!(order.line_items().iter().all(|l| l.quantity == 1));
        // Two separate decrements of one unit each.
        assert_eq!(stock(&products, "P1"), 3);
    }

    #[tokio::test]
    async fn unknown_products_only_is_bad_request() {
        let (services, products, orders) = setup(5);

        let err = services.create_order(request(&[("P7", 1)])).await.unwrap_err();

        assert_eq!(err, OrderError::NoProductsFound);
        assert_eq!(stock(&products, "P1"), 5);
        assert!(orders.list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn repeated_request_decrements_twice() {
        let (services, products, orders) = setup(5);

        let first = services.create_order(request(&[("P1", 2)])).await.unwrap();
        let second = services.create_order(request(&[("P1", 2)])).await.unwrap();

        assert_ne!(first.id(), second.id());
        assert_eq!(orders.list().unwrap().len(), 2);
        assert_eq!(stock(&products, "P1"), 1);

        // Third attempt now exceeds what is left.
        let err = services.create_order(request(&[("P1", 2)])).await.unwrap_err();
        assert!(matches!(err, OrderError::InsufficientStock { available: 1, .. }));
    }

    #[tokio::test]
    async fn price_snapshot_survives_catalog_changes() {
        let (services, products, _orders) = setup(5);

        let order = services.create_order(request(&[("P1", 1)])).await.unwrap();

        products
            .insert(CatalogProduct::new(pid("P1"), "Widget", Decimal::new(990, 1), 4).unwrap())
            .unwrap();

        assert_eq!(order.line_items()[0].unit_price, Decimal::new(100, 1));
    }

    #[tokio::test]
    async fn default_config_builds_in_memory_services() {
        let services = AppServices::build(&StoreConfig::default()).await.unwrap();
        assert!(matches!(services, AppServices::InMemory { .. }));
        assert!(services.pg_pool().is_none());
    }

    #[tokio::test]
    #[ignore = "needs a Postgres database in DATABASE_URL"]
    async fn postgres_order_round_trip() {
        let Ok(database_url) = std::env::var(DATABASE_URL) else {
            return;
        };
        let config = StoreConfig {
            backend: StoreBackend::Postgres {
                database_url,
                max_connections: 2,
            },
        };
        let services = AppServices::build(&config).await.unwrap();
        let pool = services.pg_pool().unwrap();

        // Unique ids so reruns against the same database do not collide.
        let suffix = OrderId::new().to_string();
        let customer_id = format!("C-{suffix}");
        let product_id = format!("P-{suffix}");

        sqlx::query("INSERT INTO customers (id, name, email) VALUES ($1, $2, $3)")
            .bind(&customer_id)
            .bind("Ada")
            .bind("no-at-sign")
            .execute(pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO products (id, name, price, quantity) VALUES ($1, $2, $3, $4)")
            .bind(&product_id)
            .bind("Widget")
            .bind(Decimal::new(1050, 2))
            .bind(2_i64)
            .execute(pool)
            .await
            .unwrap();

        // Each item fits the snapshot on its own; together they overdraw it.
        let order = services
            .create_order(OrderRequest::new(
                cid(&customer_id),
                vec![
                    RequestedItem {
                        product_id: pid(&product_id),
                        quantity: 2,
                    },
                    RequestedItem {
                        product_id: pid(&product_id),
                        quantity: 2,
                    },
                ],
            ))
            .await
            .unwrap();

        assert_eq!(order.customer().email(), "no-at-sign");
        assert_eq!(order.line_items().len(), 2);
        assert!(order.line_items().iter().all(|l| l.unit_price == Decimal::new(1050, 2)));

        let left: i64 = sqlx::query_scalar("SELECT quantity FROM products WHERE id = $1")
            .bind(&product_id)
            .fetch_one(pool)
            .await
            .unwrap();
        assert_eq!(left, 0);

        let lines: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM order_line_items WHERE order_id = $1")
                .bind(order.id().as_uuid())
                .fetch_one(pool)
                .await
                .unwrap();
        assert_eq!(lines, 2);
    }
}
