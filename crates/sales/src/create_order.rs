//! Order creation workflow (application-level orchestration).
//!
//! ```text
//! OrderRequest
//!   ↓
//! 1. Resolve customer            (CustomerDirectory, read)
//!   ↓
//! 2. Batch-load requested products (ProductCatalog, read)
//!   ↓
//! 3. Check quantities, stock + snapshot prices (pure)
//!   ↓
//! 4. Persist order               (OrderStore, write)
//!   ↓
//! 5. Decrement stock             (ProductCatalog, write)
//! ```
//!
//! Every rejection happens before step 4. Steps 4 and 5 are independent
//! calls: if the decrement fails, the stored order stays and the error is
//! returned to the caller.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::{error, info, warn};

use storefront_core::{Entity, ProductId};
use storefront_customers::CustomerDirectory;
use storefront_products::{CatalogProduct, ProductCatalog};

use crate::error::OrderError;
use crate::order::{NewOrder, Order, OrderLineItem};
use crate::request::{OrderRequest, RequestedItem};
use crate::store::OrderStore;

/// Creates orders from customer + item requests.
///
/// The service holds no state of its own; concurrent calls are independent.
#[derive(Debug, Clone)]
pub struct CreateOrderService<C, P, O> {
    customers: C,
    products: P,
    orders: O,
}

impl<C, P, O> CreateOrderService<C, P, O>
where
    C: CustomerDirectory,
    P: ProductCatalog,
    O: OrderStore,
{
    pub fn new(customers: C, products: P, orders: O) -> Self {
        Self {
            customers,
            products,
            orders,
        }
    }

    #[tracing::instrument(
        name = "create_order",
        skip_all,
        fields(customer_id = %request.customer_id, item_count = request.items.len())
    )]
    pub async fn create_order(&self, request: OrderRequest) -> Result<Order, OrderError> {
        let Some(customer) = self.customers.find_by_id(&request.customer_id).await? else {
            return Err(rejected(OrderError::CustomerNotFound));
        };

        // An empty item list ends up here too: nothing can match.
        let product_ids = request.distinct_product_ids();
        let catalog = self.products.find_all_by_id(&product_ids).await?;
        if catalog.is_empty() {
            return Err(rejected(OrderError::NoProductsFound));
        }

        request.validate().map_err(|e| rejected(e.into()))?;

        let line_items = price_line_items(&request.items, &catalog).map_err(rejected)?;

        let order = self
            .orders
            .create(NewOrder {
                customer,
                line_items,
            })
            .await?;

        if let Err(e) = self.products.update_quantity(&request.stock_decrements()).await {
            error!(order_id = %order.id(), error = %e, "order stored but stock decrement failed");
            return Err(e.into());
        }

        info!(
            order_id = %order.id(),
            line_count = order.line_items().len(),
            "order created"
        );

        Ok(order)
    }
}

fn rejected(err: OrderError) -> OrderError {
    warn!(code = err.code(), error = %err, "order rejected");
    err
}

/// Build one line item per requested item, pricing from the catalog snapshot.
///
/// A product missing from `catalog` counts as zero stock, so any positive
/// quantity for it fails with `InsufficientStock` and no product name.
pub fn price_line_items(
    items: &[RequestedItem],
    catalog: &[CatalogProduct],
) -> Result<Vec<OrderLineItem>, OrderError> {
    let mut by_id: HashMap<&ProductId, &CatalogProduct> = HashMap::with_capacity(catalog.len());
    for product in catalog {
        by_id.entry(product.id()).or_insert(product);
    }

    items
        .iter()
        .map(|item| {
            let record = by_id.get(&item.product_id).copied();

            if !record.map_or(item.quantity == 0, |p| p.can_fulfil(item.quantity)) {
                return Err(OrderError::InsufficientStock {
                    product_name: record.map(|p| p.name().to_string()),
                    requested: item.quantity,
                    available: record.map_or(0, CatalogProduct::available_quantity),
                });
            }

            Ok(OrderLineItem {
                product_id: item.product_id.clone(),
                unit_price: record.map_or(Decimal::ZERO, CatalogProduct::price),
                quantity: item.quantity,
            })
        })
        .collect()
}
