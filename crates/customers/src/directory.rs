//! Customer directory interface.

use std::sync::Arc;

use async_trait::async_trait;

use storefront_core::{CustomerId, RepositoryResult};

use crate::customer::Customer;

/// Resolves customer identifiers to customer records.
#[async_trait]
pub trait CustomerDirectory: Send + Sync {
    /// Look up a single customer. `Ok(None)` means the id is unknown.
    async fn find_by_id(&self, id: &CustomerId) -> RepositoryResult<Option<Customer>>;
}

#[async_trait]
impl<S> CustomerDirectory for Arc<S>
where
    S: CustomerDirectory + ?Sized,
{
    async fn find_by_id(&self, id: &CustomerId) -> RepositoryResult<Option<Customer>> {
        (**self).find_by_id(id).await
    }
}
