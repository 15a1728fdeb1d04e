//! Transaction domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use sea_apd_core::{TransactionId, TransactionStatus, UserId};

/// A bank-transfer payment from a customer to a merchant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub status: TransactionStatus,
    pub bank_number: String,
    pub bank_name: String,
    pub amount: i64,
    pub customer_id: UserId,
    pub merchant_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for inserting a transaction row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub status: TransactionStatus,
    pub bank_number: String,
    pub bank_name: String,
    pub amount: i64,
    pub customer_id: UserId,
    pub merchant_id: UserId,
}
