//! Admin user management commands.
//!
//! # Usage
//!
//! ```bash
//! sea-cli admin create -e admin@example.com -n "Admin Name" -p "a-long-password"
//! ```
//!
//! Goes through the same registration path as `POST /users/register-admin`,
//! so the password rules and duplicate-email check are identical.

use std::sync::Arc;

use sea_apd_api::db::PgUserRepository;
use sea_apd_api::models::requests::RegisterAdminRequest;
use sea_apd_api::services::{AuthError, AuthService};
use sea_apd_core::UserId;
use thiserror::Error;

use super::{CommandError, connect};

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    Connect(#[from] CommandError),

    /// User already exists.
    #[error("User already exists with email: {0}")]
    UserExists(String),

    #[error("Could not create admin: {0}")]
    Auth(AuthError),
}

/// Create a new admin user and return its id.
pub async fn create_user(email: &str, name: &str, password: &str) -> Result<UserId, AdminError> {
    let pool = connect().await?;
    let auth = AuthService::new(Arc::new(PgUserRepository::new(pool)));

    tracing::info!("Creating admin user: {}", email);

    let admin = auth
        .register_admin(RegisterAdminRequest {
            name: name.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
        })
        .await
        .map_err(|e| match e {
            AuthError::EmailTaken => AdminError::UserExists(email.to_owned()),
            other => AdminError::Auth(other),
        })?;

    tracing::info!(
        "Admin user created successfully! ID: {}, Email: {}",
        admin.id,
        admin.email
    );

    Ok(admin.id)
}
