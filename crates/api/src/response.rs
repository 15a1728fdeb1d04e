//! JSON envelope and extractors shared by every endpoint.
//!
//! Every body this API returns, success or failure, is a [`BaseResponse`]:
//!
//! ```json
//! { "code": 200, "message": "Success", "data": { ... } }
//! ```
//!
//! `data` is omitted when there is nothing to return.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, rejection::{JsonRejection, QueryRejection}},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Message used for successful responses that carry data.
pub const SUCCESS_MESSAGE: &str = "Success";

/// Response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseResponse<T = ()> {
    /// HTTP status code, repeated in the body.
    pub code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> BaseResponse<T> {
    /// Build an envelope for an arbitrary status.
    pub fn new(status: StatusCode, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            code: status.as_u16(),
            message: message.into(),
            data,
        }
    }

    /// `200 Success` with data.
    pub fn ok(data: T) -> Self {
        Self::new(StatusCode::OK, SUCCESS_MESSAGE, Some(data))
    }

    /// `201` with a message and data.
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::CREATED, message, Some(data))
    }
}

impl BaseResponse {
    /// Envelope without data.
    pub fn message(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status, message, None)
    }
}

impl<T: Serialize> IntoResponse for BaseResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// `Json` extractor whose rejections render as a `400` envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// `Query` extractor whose rejections render as a `400` envelope.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}
