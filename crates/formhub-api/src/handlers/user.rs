//! User self-service handlers. Both return a replacement token.

use axum::Json;
use axum::extract::State;

use formhub_auth::ProfileChanges;

use crate::dto::request::{ChangePasswordRequest, UpdateProfileRequest, validate_request};
use crate::dto::response::{ApiResponse, SessionResponse};
use crate::error::ApiError;
use crate::extractors::{ApiJson, AuthUser};
use crate::state::AppState;

/// PUT /api/users/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<SessionResponse>>, ApiError> {
    let session = state
        .auth_service
        .update_profile(
            &auth,
            &ProfileChanges {
                username: req.username,
                email: req.email,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(SessionResponse::from(session))))
}

/// PUT /api/users/password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<SessionResponse>>, ApiError> {
    validate_request(&req)?;
    let session = state
        .auth_service
        .change_password(&auth, &req.old_password, &req.new_password)
        .await?;
    Ok(Json(ApiResponse::ok(SessionResponse::from(session))))
}
