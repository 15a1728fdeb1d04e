//! HTTP Basic guard for admin registration.
//!
//! Only operators holding the configured `ADMIN_BASIC_USERNAME` and
//! `ADMIN_BASIC_PASSWORD` may create admin accounts.

use axum::{
    extract::FromRequestParts,
    http::{
        HeaderValue,
        header::{AUTHORIZATION, WWW_AUTHENTICATE},
        request::Parts,
    },
    response::{IntoResponse, Response},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use secrecy::ExposeSecret;

use crate::config::AdminBasicAuthConfig;
use crate::error::AppError;
use crate::state::AppState;

/// Challenge sent with every rejected request.
pub const BASIC_CHALLENGE: &str = r#"Basic realm="Restricted""#;

/// Extractor that succeeds only for the configured Basic credentials.
#[derive(Debug)]
pub struct AdminBasicAuth;

/// 401 envelope carrying a `WWW-Authenticate` challenge.
#[derive(Debug)]
pub struct BasicAuthRejection(AppError);

impl IntoResponse for BasicAuthRejection {
    fn into_response(self) -> Response {
        let mut response = self.0.into_response();
        response
            .headers_mut()
            .insert(WWW_AUTHENTICATE, HeaderValue::from_static(BASIC_CHALLENGE));
        response
    }
}

impl FromRequestParts<AppState> for AdminBasicAuth {
    type Rejection = BasicAuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(unauthorized)?;

        let (username, password) = parse_basic(header).ok_or_else(unauthorized)?;

        if credentials_match(&state.config().admin_basic, &username, &password) {
            Ok(Self)
        } else {
            tracing::warn!("rejected admin registration with bad basic credentials");
            Err(unauthorized())
        }
    }
}

fn unauthorized() -> BasicAuthRejection {
    BasicAuthRejection(AppError::Unauthorized("Unauthorized".to_string()))
}

/// Decode an `Authorization: Basic ...` value into username and password.
fn parse_basic(header: &str) -> Option<(String, String)> {
    let (scheme, encoded) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_owned(), password.to_owned()))
}

fn credentials_match(config: &AdminBasicAuthConfig, username: &str, password: &str) -> bool {
    // Evaluate both comparisons so timing does not reveal which one failed.
    let user_ok = constant_time_eq(config.username.as_bytes(), username.as_bytes());
    let pass_ok = constant_time_eq(config.password.expose_secret().as_bytes(), password.as_bytes());
    user_ok & pass_ok
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
