//! Products domain module.
//!
//! This crate contains the catalog snapshot the order workflow prices against
//! and the **product catalog** interface (batch lookup + stock decrement).

pub mod catalog;
pub mod product;

pub use catalog::ProductCatalog;
pub use product::{CatalogProduct, StockDecrement};
