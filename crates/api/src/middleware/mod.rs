//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span carrying `request_id`)
//! 3. Request ID (propagate or generate `x-request-id`)
//! 4. Session layer (tower-sessions with `PostgreSQL` store)
//! 5. Rate limiting on `/api/auth/*` (governor)
//!
//! Authorization is done per handler through the `RequireAuth`,
//! `RequireAdmin` and `AdminBasicAuth` extractors.

pub mod auth;
pub mod basic_auth;
pub mod rate_limit;
pub mod request_id;
pub mod session;

pub use auth::{RequireAdmin, RequireAuth, clear_current_user, set_current_user};
pub use basic_auth::AdminBasicAuth;
pub use rate_limit::auth_rate_limiter;
pub use request_id::request_id_middleware;
pub use session::{create_session_layer, session_layer};
