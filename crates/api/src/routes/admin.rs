//! Admin account registration.

use axum::extract::State;

use crate::error::Result;
use crate::middleware::AdminBasicAuth;
use crate::models::requests::RegisterAdminRequest;
use crate::models::user::User;
use crate::response::{ApiJson, BaseResponse};
use crate::state::AppState;

/// `POST /users/register-admin`, guarded by HTTP Basic auth.
pub async fn register_admin(
    _guard: AdminBasicAuth,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterAdminRequest>,
) -> Result<BaseResponse<User>> {
    let admin = state.auth().register_admin(request).await?;
    Ok(BaseResponse::created("Admin created successfully", admin))
}
