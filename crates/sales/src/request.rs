use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use storefront_core::{CustomerId, DomainError, DomainResult, ProductId};
use storefront_products::StockDecrement;

/// One requested product + quantity. Duplicated products are kept as separate entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Input of the order creation workflow. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub customer_id: CustomerId,
    pub items: Vec<RequestedItem>,
}

impl OrderRequest {
    pub fn new(customer_id: CustomerId, items: Vec<RequestedItem>) -> Self {
        Self { customer_id, items }
    }

    /// Every requested quantity must be positive.
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(item) = self.items.iter().find(|i| i.quantity == 0) {
            return Err(DomainError::validation(format!(
                "quantity must be positive (product {})",
                item.product_id
            )));
        }

        Ok(())
    }

    /// Distinct product ids, in order of first occurrence.
    pub fn distinct_product_ids(&self) -> Vec<ProductId> {
        let mut seen = HashSet::new();
        let mut ids = Vec::new();
        for item in &self.items {
            if seen.insert(&item.product_id) {
                ids.push(item.product_id.clone());
            }
        }
        ids
    }

    /// One decrement per requested item, same order as the request.
    pub fn stock_decrements(&self) -> Vec<StockDecrement> {
        self.items
            .iter()
            .map(|i| StockDecrement {
                product_id: i.product_id.clone(),
                quantity: i.quantity,
            })
            .collect()
    }
}
