//! Order store interface.

use std::sync::Arc;

use async_trait::async_trait;

use storefront_core::RepositoryResult;

use crate::order::{NewOrder, Order};

/// Persists new orders.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Store `order` and return it with its assigned id and creation time.
    async fn create(&self, order: NewOrder) -> RepositoryResult<Order>;
}

#[async_trait]
impl<S> OrderStore for Arc<S>
where
    S: OrderStore + ?Sized,
{
    async fn create(&self, order: NewOrder) -> RepositoryResult<Order> {
        (**self).create(order).await
    }
}
