//! SEA-APD API library.
//!
//! User and admin accounts, the product catalogue and bank-transfer
//! transactions behind a JSON HTTP interface. Exposed as a library so the
//! binary, the CLI and the tests share one router and one set of services.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;

use axum::{Router, body::Body, http::Request};
use tower_http::trace::TraceLayer;
use tower_sessions::{SessionManagerLayer, SessionStore};

use crate::state::AppState;

/// Build the application router with its middleware stack.
///
/// Sentry layers are added by the binary so they wrap everything else.
pub fn app<S>(state: AppState, sessions: SessionManagerLayer<S>, rate_limited: bool) -> Router
where
    S: SessionStore + Clone,
{
    routes::routes(rate_limited)
        .layer(sessions)
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}
