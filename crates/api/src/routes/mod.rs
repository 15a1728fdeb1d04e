//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                           - Liveness
//! GET    /health/ready                     - Readiness (database ping)
//!
//! # Auth
//! POST   /api/auth/register                - Customer registration
//! POST   /api/auth/login                   - Login, sets session cookie
//! POST   /api/auth/logout                  - Logout
//! GET    /api/auth/me                      - Current user (requires session)
//! POST   /users/register-admin             - Admin registration (HTTP Basic)
//!
//! # Products
//! GET    /api/products                     - Product listing
//! GET    /api/products/{id}                - Product detail
//! POST   /api/products                     - Create (admin)
//! PUT    /api/products/{id}                - Update (admin)
//! DELETE /api/products/{id}                - Delete (admin)
//!
//! # Transactions
//! POST   /api/transaction                  - Create
//! POST   /api/transaction/status           - Change status
//! GET    /api/transaction?transactionId=   - Lookup
//! GET    /api/transaction/history?userId=  - History for a customer or merchant
//! ```

pub mod admin;
pub mod auth;
pub mod health;
pub mod products;
pub mod transactions;

#[cfg(test)]
pub(crate) mod test_support;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::auth_rate_limiter;
use crate::state::AppState;

/// Create the auth routes router.
///
/// `rate_limited` wraps the router in the per-IP auth limiter.
pub fn auth_routes(rate_limited: bool) -> Router<AppState> {
    let router = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me));

    if rate_limited {
        router.layer(auth_rate_limiter())
    } else {
        router
    }
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route(
            "/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::delete),
        )
}

/// Create the transaction routes router.
pub fn transaction_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(transactions::show).post(transactions::create))
        .route("/status", post(transactions::update_status))
        .route("/history", get(transactions::history))
}

/// Create all routes.
pub fn routes(rate_limited: bool) -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api/auth", auth_routes(rate_limited))
        .route("/users/register-admin", post(admin::register_admin))
        .nest("/api/products", product_routes())
        .nest("/api/transaction", transaction_routes())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode};
    use tower::ServiceExt;

    use super::test_support::{Mocks, request, send};

    #[tokio::test]
    async fn test_health() {
        let app = Mocks::default().into_app();
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn test_responses_carry_request_id() {
        let app = Mocks::default().into_app();
        let (_, headers, _) = send(&app, request(Method::GET, "/api/auth/me", None, None)).await;
        assert!(headers.contains_key("x-request-id"));
    }
}
