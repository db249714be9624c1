//! Service wiring: pick collaborator implementations from [`StoreConfig`].

use std::sync::Arc;

use anyhow::Context;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use storefront_sales::{CreateOrderService, Order, OrderError, OrderRequest};

use crate::config::{StoreBackend, StoreConfig};
use crate::store::{
    InMemoryCustomerDirectory, InMemoryOrderStore, InMemoryProductCatalog,
    PostgresCustomerDirectory, PostgresOrderStore, PostgresProductCatalog, run_migrations,
};

pub type InMemoryOrderService = CreateOrderService<
    Arc<InMemoryCustomerDirectory>,
    Arc<InMemoryProductCatalog>,
    Arc<InMemoryOrderStore>,
>;

pub type PostgresOrderService =
    CreateOrderService<PostgresCustomerDirectory, PostgresProductCatalog, PostgresOrderStore>;

#[derive(Clone)]
pub enum AppServices {
    /// Dev/test wiring. The stores are exposed for seeding and inspection.
    InMemory {
        order_service: Arc<InMemoryOrderService>,
        customers: Arc<InMemoryCustomerDirectory>,
        products: Arc<InMemoryProductCatalog>,
        orders: Arc<InMemoryOrderStore>,
    },
    Persistent {
        order_service: Arc<PostgresOrderService>,
        pool: PgPool,
    },
}

impl AppServices {
    pub async fn build(config: &StoreConfig) -> anyhow::Result<Self> {
        match &config.backend {
            StoreBackend::InMemory => Ok(Self::in_memory()),
            StoreBackend::Postgres {
                database_url,
                max_connections,
            } => {
                let pool = PgPoolOptions::new()
                    .max_connections(*max_connections)
                    .connect(database_url)
                    .await
                    .context("failed to connect to postgres")?;

                run_migrations(&pool)
                    .await
                    .context("failed to apply storefront migrations")?;

                tracing::info!(max_connections, "using postgres stores");
                Ok(Self::postgres(pool))
            }
        }
    }

    pub fn in_memory() -> Self {
        let customers = Arc::new(InMemoryCustomerDirectory::new());
        let products = Arc::new(InMemoryProductCatalog::new());
        let orders = Arc::new(InMemoryOrderStore::new());

        let order_service = Arc::new(CreateOrderService::new(
            customers.clone(),
            products.clone(),
            orders.clone(),
        ));

        tracing::info!("using in-memory stores");

        Self::InMemory {
            order_service,
            customers,
            products,
            orders,
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        let order_service = Arc::new(CreateOrderService::new(
            PostgresCustomerDirectory::new(pool.clone()),
            PostgresProductCatalog::new(pool.clone()),
            PostgresOrderStore::new(pool.clone()),
        ));

        Self::Persistent {
            order_service,
            pool,
        }
    }

    /// Pool behind the persistent wiring; `None` for in-memory services.
    pub fn pg_pool(&self) -> Option<&PgPool> {
        match self {
            AppServices::InMemory { .. } => None,
            AppServices::Persistent { pool, .. } => Some(pool),
        }
    }

    pub async fn create_order(&self, request: OrderRequest) -> Result<Order, OrderError> {
        match self {
            AppServices::InMemory { order_service, .. } => order_service.create_order(request).await,
            AppServices::Persistent { order_service, .. } => {
                order_service.create_order(request).await
            }
        }
    }
}
