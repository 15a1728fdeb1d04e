//! Database access for the API.
//!
//! # Schema: `sea`
//!
//! ## Tables
//!
//! - `sea.user` - Accounts (customers, merchants, admins)
//! - `sea.product` - Product catalogue
//! - `sea.transaction` - Bank-transfer payments between customers and merchants
//! - `tower_sessions.session` - Login sessions (owned by the session store)
//!
//! Rows are never hard-deleted. `deleted_at` marks a soft delete and every
//! read filters it out.
//!
//! # Repositories
//!
//! Each table is reached through a trait (`UserRepository`, ...) so services
//! can be exercised against mocks. The `Pg*` implementations use runtime
//! checked `sqlx::query_as` queries.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p sea-apd-cli -- migrate
//! ```

pub mod products;
pub mod transactions;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use products::{PgProductRepository, ProductRepository};
pub use transactions::{PgTransactionRepository, TransactionRepository};
pub use users::{PgUserRepository, UserRepository};

#[cfg(test)]
pub use products::MockProductRepository;
#[cfg(test)]
pub use transactions::MockTransactionRepository;
#[cfg(test)]
pub use users::MockUserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Unique constraint violation (e.g., duplicate email).
    #[error("duplicate: {0}")]
    Conflict(String),

    /// Foreign key violation: a referenced row does not exist.
    #[error("missing reference: {0}")]
    MissingReference(String),
}

/// Classify an error returned by an INSERT or UPDATE.
///
/// Unique and foreign key violations become `Conflict` and
/// `MissingReference`; everything else stays a `Database` error.
pub(crate) fn map_write_error(e: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e {
        if db_err.is_unique_violation() {
            return RepositoryError::Conflict(format!("{what} already exists"));
        }
        if db_err.is_foreign_key_violation() {
            let constraint = db_err.constraint().unwrap_or("foreign key");
            return RepositoryError::MissingReference(format!("{what}: {constraint}"));
        }
    }
    RepositoryError::Database(e)
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Apply the application schema migrations.
///
/// # Errors
///
/// Returns `sqlx::migrate::MigrateError` if a migration fails or the
/// applied history diverges from the embedded migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
