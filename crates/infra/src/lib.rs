//! Infrastructure layer: collaborator implementations, config, wiring.

pub mod config;
pub mod services;
pub mod store;

#[cfg(test)]
mod integration_tests;

pub use config::{ConfigError, StoreBackend, StoreConfig};
pub use services::AppServices;
