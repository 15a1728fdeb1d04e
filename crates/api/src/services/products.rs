//! Product catalogue service.

use std::sync::Arc;

use thiserror::Error;
use validator::Validate;

use sea_apd_core::ProductId;

use crate::db::{ProductRepository, RepositoryError};
use crate::models::product::Product;
use crate::models::requests::ProductRequest;

/// Errors from product operations.
#[derive(Debug, Error)]
pub enum ProductError {
    #[error("validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("product not found")]
    NotFound,

    #[error("database error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ProductError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => Self::NotFound,
            other => Self::Repository(other),
        }
    }
}

/// Lists and manages products.
#[derive(Clone)]
pub struct ProductService {
    products: Arc<dyn ProductRepository>,
}

impl ProductService {
    #[must_use]
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    /// All live products, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ProductError::Repository` if the database operation fails.
    pub async fn list_products(&self) -> Result<Vec<Product>, ProductError> {
        Ok(self.products.list().await?)
    }

    /// # Errors
    ///
    /// Returns `ProductError::NotFound` if the product doesn't exist.
    pub async fn get_product(&self, id: ProductId) -> Result<Product, ProductError> {
        self.products
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound)
    }

    /// # Errors
    ///
    /// Returns `ProductError::Validation` for a blank name or negative
    /// price or stock.
    pub async fn create_product(&self, request: ProductRequest) -> Result<Product, ProductError> {
        validate(&request)?;
        let product = self.products.create(request.into()).await?;
        tracing::info!(product_id = %product.id, "product created");
        Ok(product)
    }

    /// Replace a product's fields.
    ///
    /// # Errors
    ///
    /// Returns `ProductError::Validation` as for create, and
    /// `ProductError::NotFound` if the product doesn't exist.
    pub async fn update_product(
        &self,
        id: ProductId,
        request: ProductRequest,
    ) -> Result<Product, ProductError> {
        validate(&request)?;
        Ok(self.products.update(id, request.into()).await?)
    }

    /// # Errors
    ///
    /// Returns `ProductError::NotFound` if the product doesn't exist.
    pub async fn delete_product(&self, id: ProductId) -> Result<(), ProductError> {
        self.products.soft_delete(id).await?;
        tracing::info!(product_id = %id, "product deleted");
        Ok(())
    }
}

/// Field rules plus a check that the name is not only whitespace.
fn validate(request: &ProductRequest) -> Result<(), ProductError> {
    request.validate()?;
    if request.name.trim().is_empty() {
        let mut errors = validator::ValidationErrors::new();
        errors.add(
            "name",
            validator::ValidationError::new("blank").with_message("name is required".into()),
        );
        return Err(errors.into());
    }
    Ok(())
}
