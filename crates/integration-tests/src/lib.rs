//! Integration tests for SEA-APD.
//!
//! # Running Tests
//!
//! ```bash
//! # Prepare the database and start the server
//! cargo run -p sea-apd-cli -- migrate
//! cargo run -p sea-apd-api
//!
//! # Run integration tests
//! cargo test -p sea-apd-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `SEA_API_BASE_URL` - Server under test (default `http://localhost:8080`)
//! - `ADMIN_BASIC_USERNAME`, `ADMIN_BASIC_PASSWORD` - Same values the server uses
//!
//! Every test registers fresh accounts with unique emails, so runs do not
//! interfere with each other or with existing data.

#![allow(clippy::missing_panics_doc, clippy::expect_used)]

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

/// Password used for every account created by the tests.
pub const TEST_PASSWORD: &str = "integration-secret";

/// Response envelope returned by every endpoint.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub code: u16,
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

impl Envelope {
    /// The `data` field, which must be present.
    #[must_use]
    pub fn data(&self) -> &Value {
        self.data.as_ref().expect("response has no data")
    }
}

/// Base URL of the server under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var("SEA_API_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

/// Absolute URL for a path on the server under test.
#[must_use]
pub fn url(path: &str) -> String {
    format!("{}{path}", base_url().trim_end_matches('/'))
}

/// HTTP client that keeps the session cookie between requests.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Email that no other test run has used.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@it.example.com", Uuid::new_v4().simple())
}

/// Decode a response into status and envelope.
pub async fn envelope(resp: reqwest::Response) -> (StatusCode, Envelope) {
    let status = resp.status();
    let body = resp.json::<Envelope>().await.expect("response is not an envelope");
    (status, body)
}

/// Register a customer and return its email and the created user.
pub async fn register_customer(client: &Client) -> (String, Value) {
    let email = unique_email("customer");
    let resp = client
        .post(url("/api/auth/register"))
        .json(&json!({
            "name": "Integration Customer",
            "email": email,
            "password": TEST_PASSWORD,
            "password_confirmation": TEST_PASSWORD,
        }))
        .send()
        .await
        .expect("register request failed");

    let (status, body) = envelope(resp).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body.message);
    (email, body.data().clone())
}

/// Log in on `client`, storing the session cookie.
pub async fn login(client: &Client, email: &str) -> Value {
    let resp = client
        .post(url("/api/auth/login"))
        .json(&json!({ "email": email, "password": TEST_PASSWORD }))
        .send()
        .await
        .expect("login request failed");

    let (status, body) = envelope(resp).await;
    assert_eq!(status, StatusCode::OK, "{}", body.message);
    body.data().clone()
}

/// Basic credentials guarding admin registration.
#[must_use]
pub fn admin_basic_credentials() -> (String, String) {
    (
        std::env::var("ADMIN_BASIC_USERNAME").expect("ADMIN_BASIC_USERNAME not set"),
        std::env::var("ADMIN_BASIC_PASSWORD").expect("ADMIN_BASIC_PASSWORD not set"),
    )
}

/// Register a fresh admin and return a client logged in as that admin.
pub async fn admin_client() -> Client {
    let (username, password) = admin_basic_credentials();
    let email = unique_email("admin");
    let client = client();

    let resp = client
        .post(url("/users/register-admin"))
        .basic_auth(username, Some(password))
        .json(&json!({
            "name": "Integration Admin",
            "email": email,
            "password": TEST_PASSWORD,
        }))
        .send()
        .await
        .expect("admin registration failed");
    assert_eq!(resp.status(), StatusCode::CREATED);

    login(&client, &email).await;
    client
}
