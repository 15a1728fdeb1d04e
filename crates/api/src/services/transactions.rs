//! Transaction service: record bank transfers and move them through
//! confirmation.
//!
//! Ids arrive as raw strings from request bodies and query parameters. A
//! blank or malformed id cannot name an existing row, so it is reported as
//! `NotFound` rather than as a validation failure.

use std::sync::Arc;

use thiserror::Error;
use validator::Validate;

use sea_apd_core::{TransactionId, TransactionStatus, UserId};

use crate::db::{RepositoryError, TransactionRepository};
use crate::models::requests::{TransactionRequest, UpdateTransactionRequest};
use crate::models::transaction::{NewTransaction, Transaction};

/// Errors from transaction operations.
#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Status name is unrecognized.
    #[error("invalid transaction status: {0}")]
    InvalidStatus(String),

    /// Transaction, customer or merchant does not exist.
    #[error("not found")]
    NotFound,

    #[error("database error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for TransactionError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound | RepositoryError::MissingReference(_) => Self::NotFound,
            other => Self::Repository(other),
        }
    }
}

#[derive(Clone)]
pub struct TransactionService {
    transactions: Arc<dyn TransactionRepository>,
}

impl TransactionService {
    #[must_use]
    pub fn new(transactions: Arc<dyn TransactionRepository>) -> Self {
        Self { transactions }
    }

    /// Record a new transfer awaiting merchant confirmation.
    ///
    /// # Errors
    ///
    /// Returns `TransactionError::Validation` for missing bank details or a
    /// non-positive amount, and `TransactionError::NotFound` when the
    /// customer or merchant does not exist.
    pub async fn create_transaction(
        &self,
        request: TransactionRequest,
    ) -> Result<Transaction, TransactionError> {
        request.validate()?;

        let customer_id = parse_id::<UserId>(&request.customer_id)?;
        let merchant_id = parse_id::<UserId>(&request.merchant_id)?;

        let transaction = self
            .transactions
            .create(NewTransaction {
                status: TransactionStatus::WaitingConfirmation,
                bank_number: request.bank_number.trim().to_owned(),
                bank_name: request.bank_name.trim().to_owned(),
                amount: request.amount,
                customer_id,
                merchant_id,
            })
            .await?;

        tracing::info!(
            transaction_id = %transaction.id,
            %customer_id,
            %merchant_id,
            amount = transaction.amount,
            "transaction created"
        );
        Ok(transaction)
    }

    /// Move a transaction to a new status.
    ///
    /// Any recognized status may replace any other.
    ///
    /// # Errors
    ///
    /// Returns `TransactionError::InvalidStatus` for an unrecognized status
    /// and `TransactionError::NotFound` if the transaction doesn't exist.
    pub async fn update_transaction_status(
        &self,
        request: UpdateTransactionRequest,
    ) -> Result<Transaction, TransactionError> {
        let status = TransactionStatus::from_name(&request.status);
        if !status.is_assignable() {
            return Err(TransactionError::InvalidStatus(request.status));
        }

        let id = parse_id::<TransactionId>(&request.transaction_id)?;
        let transaction = self.transactions.update_status(id, status).await?;

        tracing::info!(transaction_id = %id, %status, "transaction status updated");
        Ok(transaction)
    }

    /// # Errors
    ///
    /// Returns `TransactionError::NotFound` for a blank, malformed or
    /// unknown id.
    pub async fn get_transaction_by_id(
        &self,
        transaction_id: &str,
    ) -> Result<Transaction, TransactionError> {
        let id = parse_id::<TransactionId>(transaction_id)?;
        self.transactions
            .get_by_id(id)
            .await?
            .ok_or(TransactionError::NotFound)
    }

    /// Every transaction the user took part in, as customer or merchant.
    ///
    /// # Errors
    ///
    /// Returns `TransactionError::NotFound` for a blank or malformed id. A
    /// well-formed id with no transactions yields an empty list.
    pub async fn get_transaction_history(
        &self,
        user_id: &str,
    ) -> Result<Vec<Transaction>, TransactionError> {
        let id = parse_id::<UserId>(user_id)?;
        Ok(self.transactions.list_by_user(id).await?)
    }
}

fn parse_id<T>(raw: &str) -> Result<T, TransactionError>
where
    T: std::str::FromStr<Err = sea_apd_core::IdError>,
{
    raw.parse().map_err(|_| TransactionError::NotFound)
}
