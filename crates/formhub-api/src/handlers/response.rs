//! Response submission and statistics handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use formhub_core::types::FormId;
use formhub_entity::response::{FormResponse, FormStats};
use formhub_service::response::answers_from_json;

use crate::dto::request::SubmitResponseRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiPath, AuthUser};
use crate::state::AppState;

/// POST /api/typebots/{id}/responses
pub async fn submit(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<FormId>,
    ApiJson(req): ApiJson<SubmitResponseRequest>,
) -> Result<(StatusCode, Json<ApiResponse<FormResponse>>), ApiError> {
    let answers = answers_from_json(&req.responses)?;
    let response = state.response_service.submit(id, &answers).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(response))))
}

/// GET /api/typebots/{id}/stats
pub async fn stats(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiPath(id): ApiPath<FormId>,
) -> Result<Json<ApiResponse<FormStats>>, ApiError> {
    let stats = state.response_service.stats(id).await?;
    Ok(Json(ApiResponse::ok(stats)))
}
