//! Request payloads accepted by the services.
//!
//! Every payload derives `Default` and is deserialized with `#[serde(default)]`,
//! so an empty JSON object decodes successfully and is rejected by validation
//! instead of by the JSON extractor. Field-level rules use `validator`; rules
//! that span fields or need domain parsing live in the services.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::product::ProductFields;

/// Customer self-registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterUserRequest {
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    pub password_confirmation: String,
}

/// Admin registration, guarded by HTTP Basic auth.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterAdminRequest {
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Email and password login.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Product create/update body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ProductRequest {
    #[validate(length(min = 1, max = 200, message = "name is required"))]
    pub name: String,
    pub description: String,
    #[validate(range(min = 0, message = "price cannot be negative"))]
    pub price: i64,
    pub image: String,
    #[validate(range(min = 0, message = "stock cannot be negative"))]
    pub stock: i32,
}

impl From<ProductRequest> for ProductFields {
    fn from(request: ProductRequest) -> Self {
        Self {
            name: request.name.trim().to_owned(),
            description: request.description,
            price: request.price,
            image: request.image,
            stock: request.stock,
        }
    }
}

/// New transaction body.
///
/// Ids arrive as strings so that blank or malformed ids can be reported as
/// unknown references rather than as decoding failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct TransactionRequest {
    #[validate(length(min = 1, max = 64, message = "bank_number is required"))]
    pub bank_number: String,
    #[validate(length(min = 1, max = 100, message = "bank_name is required"))]
    pub bank_name: String,
    #[validate(range(min = 1, message = "amount must be positive"))]
    pub amount: i64,
    pub customer_id: String,
    pub merchant_id: String,
}

/// Status change body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateTransactionRequest {
    pub transaction_id: String,
    pub status: String,
}
