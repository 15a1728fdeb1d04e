//! Authentication service.
//!
//! Registers customers and admins and checks passwords on login. Admins are
//! ordinary users whose role is [`UserRole::Admin`].

mod error;

pub use error::AuthError;

use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use validator::Validate;

use sea_apd_core::{Email, UserId, UserRole};

use crate::db::{RepositoryError, UserRepository};
use crate::models::requests::{RegisterAdminRequest, RegisterUserRequest};
use crate::models::user::{NewUser, User};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Authentication service.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
}

impl AuthService {
    /// Create a new authentication service.
    #[must_use]
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Register a customer account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordMismatch` if the confirmation differs.
    /// Returns `AuthError::Validation` if a required field is missing.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AuthError::EmailTaken` if the email is already registered.
    pub async fn register_user(&self, request: RegisterUserRequest) -> Result<User, AuthError> {
        if request.password != request.password_confirmation {
            return Err(AuthError::PasswordMismatch);
        }

        request.validate()?;

        self.register(
            &request.name,
            &request.email,
            &request.password,
            UserRole::Customer,
        )
        .await
    }

    /// Register an admin account.
    ///
    /// # Errors
    ///
    /// Same as [`AuthService::register_user`], minus the confirmation check.
    pub async fn register_admin(&self, request: RegisterAdminRequest) -> Result<User, AuthError> {
        request.validate()?;

        self.register(
            &request.name,
            &request.email,
            &request.password,
            UserRole::Admin,
        )
        .await
    }

    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> Result<User, AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;
        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(NewUser {
                name: name.trim().to_owned(),
                email,
                password_hash,
                role,
            })
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::EmailTaken,
                other => AuthError::Repository(other),
            })?;

        tracing::info!(user_id = %user.id, role = %user.role, "user registered");
        Ok(user)
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        // A malformed email cannot belong to anyone.
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let (user, password_hash) = self
            .users
            .get_credentials(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(user)
    }

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if the user doesn't exist.
    pub async fn get_user(&self, user_id: UserId) -> Result<User, AuthError> {
        self.users
            .get_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::db::MockUserRepository;

    fn user_from(new_user: &NewUser) -> User {
        User {
            id: UserId::generate(),
            name: new_user.name.clone(),
            email: new_user.email.clone(),
            role: new_user.role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn register_request() -> RegisterUserRequest {
        RegisterUserRequest {
            name: "Rina".to_string(),
            email: "Rina@Example.com".to_string(),
            password: "correct-horse".to_string(),
            password_confirmation: "correct-horse".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_user_hashes_password_and_assigns_customer_role() {
        let mut users = MockUserRepository::new();
        users
            .expect_create()
            .withf(|u| {
                u.email.as_str() == "rina@example.com"
                    && u.role == UserRole::Customer
                    && u.password_hash != "correct-horse"
                    && verify_password("correct-horse", &u.password_hash).is_ok()
            })
            .times(1)
            .returning(|u| Ok(user_from(&u)));

        let service = AuthService::new(Arc::new(users));
        let user = service.register_user(register_request()).await.unwrap();

        assert_eq!(user.role, UserRole::Customer);
        assert_eq!(user.email.as_str(), "rina@example.com");
    }

    #[tokio::test]
    async fn test_register_user_rejects_mismatched_confirmation() {
        let mut users = MockUserRepository::new();
        users.expect_create().never();

        let service = AuthService::new(Arc::new(users));
        let request = RegisterUserRequest {
            password_confirmation: "something-else".to_string(),
            ..register_request()
        };

        let err = service.register_user(request).await.unwrap_err();
        assert!(matches!(err, AuthError::PasswordMismatch));
    }

    #[tokio::test]
    async fn test_register_user_checks_confirmation_before_required_fields() {
        let service = AuthService::new(Arc::new(MockUserRepository::new()));
        let request = RegisterUserRequest {
            password: String::new(),
            password_confirmation: "correct-horse".to_string(),
            ..RegisterUserRequest::default()
        };

        let err = service.register_user(request).await.unwrap_err();
        assert!(matches!(err, AuthError::PasswordMismatch));
    }

    #[tokio::test]
    async fn test_register_user_rejects_short_password() {
        let service = AuthService::new(Arc::new(MockUserRepository::new()));
        let request = RegisterUserRequest {
            password: "short".to_string(),
            password_confirmation: "short".to_string(),
            ..register_request()
        };

        let err = service.register_user(request).await.unwrap_err();
        assert!(matches!(err, AuthError::WeakPassword(_)));
    }

    #[tokio::test]
    async fn test_register_user_rejects_empty_request() {
        let service = AuthService::new(Arc::new(MockUserRepository::new()));
        let err = service
            .register_user(RegisterUserRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
    }

    #[tokio::test]
    async fn test_register_user_rejects_bad_email() {
        let service = AuthService::new(Arc::new(MockUserRepository::new()));
        let request = RegisterUserRequest {
            email: "not-an-email".to_string(),
            ..register_request()
        };

        let err = service.register_user(request).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidEmail(_)));
    }

    #[tokio::test]
    async fn test_register_duplicate_email_is_taken() {
        let mut users = MockUserRepository::new();
        users
            .expect_create()
            .returning(|_| Err(RepositoryError::Conflict("email already exists".to_string())));

        let service = AuthService::new(Arc::new(users));
        let err = service.register_user(register_request()).await.unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn test_register_admin_assigns_admin_role() {
        let mut users = MockUserRepository::new();
        users
            .expect_create()
            .withf(|u| u.role == UserRole::Admin)
            .returning(|u| Ok(user_from(&u)));

        let service = AuthService::new(Arc::new(users));
        let admin = service
            .register_admin(RegisterAdminRequest {
                name: "Ops".to_string(),
                email: "ops@example.com".to_string(),
                password: "long-enough-secret".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(admin.role, UserRole::Admin);
    }

    #[tokio::test]
    async fn test_login_verifies_password() {
        let hash = hash_password("correct-horse").unwrap();
        let stored = User {
            id: UserId::generate(),
            name: "Rina".to_string(),
            email: Email::parse("rina@example.com").unwrap(),
            role: UserRole::Customer,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let mut users = MockUserRepository::new();
        let returned = stored.clone();
        users
            .expect_get_credentials()
            .returning(move |_| Ok(Some((returned.clone(), hash.clone()))));

        let service = AuthService::new(Arc::new(users));

        let user = service
            .login("RINA@example.com", "correct-horse")
            .await
            .unwrap();
        assert_eq!(user.id, stored.id);

        let err = service
            .login("rina@example.com", "wrong-horse")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_invalid_credentials() {
        let mut users = MockUserRepository::new();
        users.expect_get_credentials().returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(users));

        let err = service
            .login("nobody@example.com", "whatever-password")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));

        let err = service.login("garbage", "whatever").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_get_by_id().returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(users));
        let err = service.get_user(UserId::generate()).await.unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }
}
