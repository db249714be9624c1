//! Customer directory, product catalog and order store implementations.

pub mod in_memory;
pub mod postgres;

pub use in_memory::{InMemoryCustomerDirectory, InMemoryOrderStore, InMemoryProductCatalog};
pub use postgres::{
    MIGRATION_SQL, PostgresCustomerDirectory, PostgresOrderStore, PostgresProductCatalog,
    run_migrations,
};
