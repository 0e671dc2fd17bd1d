//! Auth handlers: register, login, logout, check, check-email.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use formhub_auth::Registration;

use crate::dto::request::{CheckEmailRequest, LoginRequest, RegisterRequest, validate_request};
use crate::dto::response::{
    ApiResponse, EmailExistsResponse, MessageResponse, SessionResponse,
};
use crate::error::ApiError;
use crate::extractors::{ApiJson, AuthUser};
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SessionResponse>>), ApiError> {
    validate_request(&req)?;

    let session = state
        .auth_service
        .register(
            &Registration {
                username: req.username,
                email: req.email,
                password: req.password,
            },
            &req.confirm_password,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(SessionResponse::from(session))),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<ApiResponse<SessionResponse>>, ApiError> {
    validate_request(&req)?;
    let session = state.auth_service.login(&req.email, &req.password).await?;
    Ok(Json(ApiResponse::ok(SessionResponse::from(session))))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Json<ApiResponse<MessageResponse>> {
    state.auth_service.logout(&auth);
    Json(ApiResponse::ok(MessageResponse::new(
        "Logged out successfully",
    )))
}

/// GET /api/auth/check
pub async fn check(auth: AuthUser) -> Json<ApiResponse<SessionResponse>> {
    Json(ApiResponse::ok(SessionResponse::from(auth.session)))
}

/// POST /api/auth/check-email
pub async fn check_email(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CheckEmailRequest>,
) -> Result<Json<ApiResponse<EmailExistsResponse>>, ApiError> {
    let exists = state.auth_service.email_exists(&req.email).await?;
    Ok(Json(ApiResponse::ok(EmailExistsResponse { exists })))
}
