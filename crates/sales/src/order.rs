use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use storefront_core::{Entity, OrderId, ProductId};
use storefront_customers::Customer;

/// Order line: product, price snapshot, quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub product_id: ProductId,
    /// Catalog price at the moment the order was created. Never recomputed.
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl OrderLineItem {
    /// `unit_price × quantity`, or `None` if it exceeds the `Decimal` range.
    pub fn subtotal(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity))
    }
}

/// Order content handed to an [`crate::OrderStore`] for persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub customer: Customer,
    pub line_items: Vec<OrderLineItem>,
}

/// A stored order. The store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    customer: Customer,
    line_items: Vec<OrderLineItem>,
    created_at: DateTime<Utc>,
}

impl Order {
    pub fn new(
        id: OrderId,
        customer: Customer,
        line_items: Vec<OrderLineItem>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            customer,
            line_items,
            created_at,
        }
    }

    /// Materialize a [`NewOrder`] with store-assigned identity.
    pub fn from_new(id: OrderId, new_order: NewOrder, created_at: DateTime<Utc>) -> Self {
        Self::new(id, new_order.customer, new_order.line_items, created_at)
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn line_items(&self) -> &[OrderLineItem] {
        &self.line_items
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Sum of the line subtotals; `None` on `Decimal` overflow.
    pub fn total(&self) -> Option<Decimal> {
        self.line_items
            .iter()
            .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(line.subtotal()?))
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
