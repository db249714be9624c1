use thiserror::Error;

use storefront_core::{DomainError, RepositoryError};

/// Failure of the order creation workflow.
///
/// Every variant carries a client-facing message (`Display`) and an
/// HTTP-style status via [`OrderError::status_code`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("Customer not found")]
    CustomerNotFound,

    /// None of the requested products exist in the catalog.
    #[error("Product not found")]
    NoProductsFound,

    /// `product_name` is `None` when the product was missing from an
    /// otherwise non-empty catalog result (its stock then counts as zero).
    #[error(
        "The quantity of requested product {}, can't be bigger than {available}",
        .product_name.as_deref().unwrap_or("unknown")
    )]
    InsufficientStock {
        product_name: Option<String>,
        requested: u32,
        available: u32,
    },

    #[error("invalid order request: {0}")]
    InvalidRequest(#[from] DomainError),

    #[error("repository failure: {0}")]
    Repository(#[from] RepositoryError),
}

impl OrderError {
    pub fn status_code(&self) -> u16 {
        match self {
            OrderError::CustomerNotFound
            | OrderError::NoProductsFound
            | OrderError::InsufficientStock { .. }
            | OrderError::InvalidRequest(_) => 400,
            OrderError::Repository(_) => 500,
        }
    }

    /// Stable machine-readable code for response bodies and logs.
    pub fn code(&self) -> &'static str {
        match self {
            OrderError::CustomerNotFound => "customer_not_found",
            OrderError::NoProductsFound => "product_not_found",
            OrderError::InsufficientStock { .. } => "insufficient_stock",
            OrderError::InvalidRequest(_) => "validation_error",
            OrderError::Repository(_) => "repository_error",
        }
    }
}
