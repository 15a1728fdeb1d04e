//! Authentication route handlers.
//!
//! Customer registration, password login backed by a server-side session,
//! logout, and the current-user lookup.

use axum::{extract::State, http::StatusCode};
use tower_sessions::Session;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{RequireAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::models::requests::{LoginRequest, RegisterUserRequest};
use crate::models::user::User;
use crate::response::{ApiJson, BaseResponse};
use crate::state::AppState;

/// `POST /api/auth/register`
pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterUserRequest>,
) -> Result<BaseResponse<User>> {
    let user = state.auth().register_user(request).await?;
    Ok(BaseResponse::created("User created successfully", user))
}

/// `POST /api/auth/login`
///
/// On success the user is stored in the session and the session cookie is
/// returned with the response.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<BaseResponse<User>> {
    let user = match state.auth().login(&request.email, &request.password).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!("Login failed: {}", e);
            return Err(e.into());
        }
    };

    set_current_user(&session, &CurrentUser::from(&user))
        .await
        .map_err(|e| AppError::Internal(format!("failed to set session: {e}")))?;
    set_sentry_user(&user.id, Some(user.email.as_str()));

    Ok(BaseResponse::ok(user))
}

/// `POST /api/auth/logout`
pub async fn logout(session: Session) -> Result<BaseResponse> {
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("failed to clear session: {e}")))?;
    clear_sentry_user();

    Ok(BaseResponse::message(StatusCode::OK, "Logged out"))
}

/// `GET /api/auth/me`
pub async fn me(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
) -> Result<BaseResponse<User>> {
    let user = state.auth().get_user(current.id).await?;
    Ok(BaseResponse::ok(user))
}
