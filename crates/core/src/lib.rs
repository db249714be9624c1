//! `storefront-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, the entity trait, and the error types shared by every
//! collaborator interface.

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult, RepositoryError, RepositoryResult};
pub use id::{CustomerId, OrderId, ProductId};
