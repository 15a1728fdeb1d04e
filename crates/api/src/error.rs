//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`, and every error renders as a [`BaseResponse`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::response::BaseResponse;
use crate::services::{AuthError, ProductError, TransactionError};

/// Message for every unknown or unparseable id.
pub const NOT_FOUND_MESSAGE: &str = "Not Found";

/// Message for every server-side failure. Details stay in logs and Sentry.
pub const INTERNAL_ERROR_MESSAGE: &str = "Something Error";

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Registration or login failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Product operation failed.
    #[error("Product error: {0}")]
    Product(#[from] ProductError),

    /// Transaction operation failed.
    #[error("Transaction error: {0}")]
    Transaction(#[from] TransactionError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Caller is authenticated but lacks the required role.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(err) => match err {
                AuthError::Validation(_)
                | AuthError::InvalidEmail(_)
                | AuthError::PasswordMismatch
                | AuthError::WeakPassword(_)
                | AuthError::EmailTaken => StatusCode::BAD_REQUEST,
                AuthError::InvalidCredentials | AuthError::UserNotFound => StatusCode::UNAUTHORIZED,
                AuthError::Repository(_) | AuthError::PasswordHash => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Product(err) => match err {
                ProductError::Validation(_) => StatusCode::BAD_REQUEST,
                ProductError::NotFound => StatusCode::NOT_FOUND,
                ProductError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            // An incomplete transaction request cannot match a row.
            Self::Transaction(err) => match err {
                TransactionError::Validation(_)
                | TransactionError::InvalidStatus(_)
                | TransactionError::NotFound => StatusCode::NOT_FOUND,
                TransactionError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Client-facing message. Never includes internal error details.
    #[must_use]
    pub fn message(&self) -> String {
        if self.status().is_server_error() {
            return INTERNAL_ERROR_MESSAGE.to_string();
        }

        match self {
            Self::Auth(err) => match err {
                AuthError::Validation(errors) => errors.to_string(),
                AuthError::InvalidEmail(_) => "Invalid email address".to_string(),
                AuthError::PasswordMismatch => "Password confirmation does not match".to_string(),
                AuthError::WeakPassword(msg) => msg.clone(),
                AuthError::EmailTaken => "Email has been taken".to_string(),
                _ => "Invalid credentials".to_string(),
            },
            Self::Product(ProductError::Validation(errors)) => errors.to_string(),
            Self::NotFound(_) | Self::Product(ProductError::NotFound) | Self::Transaction(_) => {
                NOT_FOUND_MESSAGE.to_string()
            }
            Self::Unauthorized(msg) | Self::Forbidden(msg) | Self::BadRequest(msg) => msg.clone(),
            _ => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        BaseResponse::message(status, self.message()).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from a user ID.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}
