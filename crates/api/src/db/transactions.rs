//! Transaction repository for database operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use sea_apd_core::{TransactionId, TransactionStatus, UserId};

use super::{RepositoryError, map_write_error};
use crate::models::transaction::{NewTransaction, Transaction};

/// Persistence operations on `sea.transaction`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Insert a transaction. Unknown customer or merchant ids yield
    /// `RepositoryError::MissingReference`.
    async fn create(&self, transaction: NewTransaction) -> Result<Transaction, RepositoryError>;

    /// Set the status of a live transaction. Returns `NotFound` if absent.
    async fn update_status(
        &self,
        id: TransactionId,
        status: TransactionStatus,
    ) -> Result<Transaction, RepositoryError>;

    async fn get_by_id(&self, id: TransactionId)
    -> Result<Option<Transaction>, RepositoryError>;

    /// Transactions where the user is the customer or the merchant, newest first.
    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Transaction>, RepositoryError>;
}

#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: TransactionId,
    status: TransactionStatus,
    bank_number: String,
    bank_name: String,
    amount: i64,
    customer_id: UserId,
    merchant_id: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TransactionRow> for Transaction {
    fn from(row: TransactionRow) -> Self {
        Self {
            id: row.id,
            status: row.status,
            bank_number: row.bank_number,
            bank_name: row.bank_name,
            amount: row.amount,
            customer_id: row.customer_id,
            merchant_id: row.merchant_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const TRANSACTION_COLUMNS: &str = "id, status, bank_number, bank_name, amount, \
     customer_id, merchant_id, created_at, updated_at";

/// `PostgreSQL` implementation of [`TransactionRepository`].
#[derive(Debug, Clone)]
pub struct PgTransactionRepository {
    pool: PgPool,
}

impl PgTransactionRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionRepository for PgTransactionRepository {
    async fn create(&self, transaction: NewTransaction) -> Result<Transaction, RepositoryError> {
        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            r"
            INSERT INTO sea.transaction
                (id, status, bank_number, bank_name, amount, customer_id, merchant_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {TRANSACTION_COLUMNS}
            "
        ))
        .bind(TransactionId::generate())
        .bind(transaction.status)
        .bind(&transaction.bank_number)
        .bind(&transaction.bank_name)
        .bind(transaction.amount)
        .bind(transaction.customer_id)
        .bind(transaction.merchant_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "transaction"))?;

        Ok(row.into())
    }

    async fn update_status(
        &self,
        id: TransactionId,
        status: TransactionStatus,
    ) -> Result<Transaction, RepositoryError> {
        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            r"
            UPDATE sea.transaction
            SET status = $2, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {TRANSACTION_COLUMNS}
            "
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Transaction::from).ok_or(RepositoryError::NotFound)
    }

    async fn get_by_id(
        &self,
        id: TransactionId,
    ) -> Result<Option<Transaction>, RepositoryError> {
        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            r"
            SELECT {TRANSACTION_COLUMNS}
            FROM sea.transaction
            WHERE id = $1 AND deleted_at IS NULL
            "
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Transaction::from))
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Transaction>, RepositoryError> {
        let rows = sqlx::query_as::<_, TransactionRow>(&format!(
            r"
            SELECT {TRANSACTION_COLUMNS}
            FROM sea.transaction
            WHERE (customer_id = $1 OR merchant_id = $1) AND deleted_at IS NULL
            ORDER BY created_at DESC
            "
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Transaction::from).collect())
    }
}
