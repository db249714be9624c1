//! Customers domain module.
//!
//! This crate owns the customer record and the **customer directory**
//! interface the order workflow resolves customers through. Implementations
//! live in `storefront-infra`.

pub mod customer;
pub mod directory;

pub use customer::Customer;
pub use directory::CustomerDirectory;
