//! Product catalog interface.

use std::sync::Arc;

use async_trait::async_trait;

use storefront_core::{ProductId, RepositoryResult};

use crate::product::{CatalogProduct, StockDecrement};

/// Batch product lookup and stock bookkeeping.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Return the records whose id is in `ids`.
    ///
    /// Unknown ids are silently omitted; the result order is unspecified.
    async fn find_all_by_id(&self, ids: &[ProductId]) -> RepositoryResult<Vec<CatalogProduct>>;

    /// Apply each decrement in order. Entries for the same product are applied
    /// one after another, never merged.
    async fn update_quantity(&self, decrements: &[StockDecrement]) -> RepositoryResult<()>;
}

#[async_trait]
impl<S> ProductCatalog for Arc<S>
where
    S: ProductCatalog + ?Sized,
{
    async fn find_all_by_id(&self, ids: &[ProductId]) -> RepositoryResult<Vec<CatalogProduct>> {
        (**self).find_all_by_id(ids).await
    }

    async fn update_quantity(&self, decrements: &[StockDecrement]) -> RepositoryResult<()> {
        (**self).update_quantity(decrements).await
    }
}
