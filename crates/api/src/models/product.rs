//! Product domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use sea_apd_core::ProductId;

/// A catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Price in the smallest currency unit.
    pub price: i64,
    /// Image URL.
    pub image: String,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Writable product fields, used for both insert and full update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductFields {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub image: String,
    pub stock: i32,
}
