//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ApiConfig;
use crate::db::{
    PgProductRepository, PgTransactionRepository, PgUserRepository, ProductRepository,
    TransactionRepository, UserRepository,
};
use crate::services::{AuthService, ProductService, TransactionService};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// configuration, the connection pool and the services.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    pool: PgPool,
    auth: AuthService,
    products: ProductService,
    transactions: TransactionService,
}

impl AppState {
    /// Create a new application state backed by `PostgreSQL` repositories.
    ///
    /// # Arguments
    ///
    /// * `config` - API configuration
    /// * `pool` - `PostgreSQL` connection pool
    #[must_use]
    pub fn new(config: ApiConfig, pool: PgPool) -> Self {
        let users = Arc::new(PgUserRepository::new(pool.clone()));
        let products = Arc::new(PgProductRepository::new(pool.clone()));
        let transactions = Arc::new(PgTransactionRepository::new(pool.clone()));
        Self::with_repositories(config, pool, users, products, transactions)
    }

    /// Create state over arbitrary repositories.
    ///
    /// The pool is only used by the readiness probe.
    #[must_use]
    pub fn with_repositories(
        config: ApiConfig,
        pool: PgPool,
        users: Arc<dyn UserRepository>,
        products: Arc<dyn ProductRepository>,
        transactions: Arc<dyn TransactionRepository>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                auth: AuthService::new(users),
                products: ProductService::new(products),
                transactions: TransactionService::new(transactions),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    #[must_use]
    pub fn auth(&self) -> &AuthService {
        &self.inner.auth
    }

    #[must_use]
    pub fn products(&self) -> &ProductService {
        &self.inner.products
    }

    #[must_use]
    pub fn transactions(&self) -> &TransactionService {
        &self.inner.transactions
    }
}
