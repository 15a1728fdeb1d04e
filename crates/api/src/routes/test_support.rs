//! In-process router fixtures for handler tests.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use chrono::Utc;
use secrecy::SecretString;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use tower_sessions::MemoryStore;

use sea_apd_core::{Email, UserId, UserRole};

use crate::config::{AdminBasicAuthConfig, ApiConfig, SentryConfig};
use crate::db::{MockProductRepository, MockTransactionRepository, MockUserRepository};
use crate::middleware::session::{SESSION_COOKIE_NAME, session_layer};
use crate::models::user::User;
use crate::state::AppState;

pub const ADMIN_BASIC_USER: &str = "ops";
pub const ADMIN_BASIC_PASSWORD: &str = "k9#Lm2$pQ7vX";

/// Repository mocks; set expectations before calling [`Mocks::into_app`].
#[derive(Default)]
pub struct Mocks {
    pub users: MockUserRepository,
    pub products: MockProductRepository,
    pub transactions: MockTransactionRepository,
}

impl Mocks {
    pub fn into_app(self) -> Router {
        let config = ApiConfig {
            database_url: SecretString::from("postgres://localhost/sea_test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 8080,
            base_url: "http://localhost:8080".to_string(),
            admin_basic: AdminBasicAuthConfig {
                username: ADMIN_BASIC_USER.to_string(),
                password: SecretString::from(ADMIN_BASIC_PASSWORD),
            },
            sentry: SentryConfig::default(),
        };

        // Never connects: handlers under test only reach the mocks.
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/sea_test")
            .unwrap();

        let state = AppState::with_repositories(
            config,
            pool,
            Arc::new(self.users),
            Arc::new(self.products),
            Arc::new(self.transactions),
        );

        crate::app(state, session_layer(MemoryStore::default(), false), false)
    }
}

pub fn user(role: UserRole, email: &str) -> User {
    User {
        id: UserId::generate(),
        name: "Test User".to_string(),
        email: Email::parse(email).unwrap(),
        role,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn password_hash(password: &str) -> String {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .unwrap()
        .to_string()
}

pub fn request(method: Method, uri: &str, body: Option<Value>, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Send a request and decode the JSON envelope.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, body)
}

/// `name=value` pair of the session cookie, ready for a `Cookie` header.
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&format!("{SESSION_COOKIE_NAME}=")))
        .and_then(|v| v.split(';').next())
        .map(str::to_owned)
}

/// Log in through the real handler and return the session cookie.
pub async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, headers, _) = send(
        app,
        request(
            Method::POST,
            "/api/auth/login",
            Some(serde_json::json!({ "email": email, "password": password })),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    session_cookie(&headers).unwrap()
}

/// Mock `get_credentials` so `email` can log in with `password`.
pub fn expect_login(users: &mut MockUserRepository, account: &User, password: &str) {
    let hash = password_hash(password);
    let account = account.clone();
    let email = account.email.clone();
    users
        .expect_get_credentials()
        .withf(move |e| e.as_str() == email.as_str())
        .returning(move |_| Ok(Some((account.clone(), hash.clone()))));
}
