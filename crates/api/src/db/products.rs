//! Product repository for database operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use sea_apd_core::ProductId;

use super::{RepositoryError, map_write_error};
use crate::models::product::{Product, ProductFields};

/// Persistence operations on `sea.product`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All live products, newest first.
    async fn list(&self) -> Result<Vec<Product>, RepositoryError>;

    async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;

    async fn create(&self, fields: ProductFields) -> Result<Product, RepositoryError>;

    /// Replace every writable field. Returns `NotFound` for missing or deleted rows.
    async fn update(
        &self,
        id: ProductId,
        fields: ProductFields,
    ) -> Result<Product, RepositoryError>;

    /// Mark a product deleted. Returns `NotFound` if it is already gone.
    async fn soft_delete(&self, id: ProductId) -> Result<(), RepositoryError>;
}

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    description: String,
    price: i64,
    image: String,
    stock: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            image: row.image,
            stock: row.stock,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const PRODUCT_COLUMNS: &str =
    "id, name, description, price, image, stock, created_at, updated_at";

/// `PostgreSQL` implementation of [`ProductRepository`].
#[derive(Debug, Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            r"
            SELECT {PRODUCT_COLUMNS}
            FROM sea.product
            WHERE deleted_at IS NULL
            ORDER BY created_at DESC
            "
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r"
            SELECT {PRODUCT_COLUMNS}
            FROM sea.product
            WHERE id = $1 AND deleted_at IS NULL
            "
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Product::from))
    }

    async fn create(&self, fields: ProductFields) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r"
            INSERT INTO sea.product (id, name, description, price, image, stock)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(ProductId::generate())
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.price)
        .bind(&fields.image)
        .bind(fields.stock)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "product"))?;

        Ok(row.into())
    }

    async fn update(
        &self,
        id: ProductId,
        fields: ProductFields,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r"
            UPDATE sea.product
            SET name = $2,
                description = $3,
                price = $4,
                image = $5,
                stock = $6,
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(id)
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.price)
        .bind(&fields.image)
        .bind(fields.stock)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "product"))?;

        row.map(Product::from).ok_or(RepositoryError::NotFound)
    }

    async fn soft_delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE sea.product
            SET deleted_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
