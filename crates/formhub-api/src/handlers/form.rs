//! Typebot handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use formhub_core::types::FormId;
use formhub_entity::form::{Form, PublicForm};

use crate::dto::request::{MoveFormRequest, NameRequest, SetFieldsRequest, validate_request};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiPath, AuthUser};
use crate::state::AppState;

/// GET /api/typebots
pub async fn list_unfiled(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Form>>>, ApiError> {
    let forms = state.form_service.list_unfiled(&auth).await?;
    Ok(Json(ApiResponse::ok(forms)))
}

/// POST /api/typebots
pub async fn create_unfiled(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<NameRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Form>>), ApiError> {
    validate_request(&req)?;
    let form = state.form_service.create_unfiled(&auth, &req.name).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(form))))
}

/// GET /api/typebots/{id}
pub async fn get_form(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<FormId>,
) -> Result<Json<ApiResponse<Form>>, ApiError> {
    let form = state.form_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(form)))
}

/// PUT /api/typebots/{id}
pub async fn rename_form(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<FormId>,
    ApiJson(req): ApiJson<NameRequest>,
) -> Result<Json<ApiResponse<Form>>, ApiError> {
    validate_request(&req)?;
    let form = state.form_service.rename(&auth, id, &req.name).await?;
    Ok(Json(ApiResponse::ok(form)))
}

/// DELETE /api/typebots/{id}
pub async fn delete_form(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<FormId>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.form_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Typebot deleted"))))
}

/// PUT /api/typebots/{id}/fields
pub async fn set_fields(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<FormId>,
    ApiJson(req): ApiJson<SetFieldsRequest>,
) -> Result<Json<ApiResponse<Form>>, ApiError> {
    let form = state.form_service.set_fields(&auth, id, &req.fields).await?;
    Ok(Json(ApiResponse::ok(form)))
}

/// PUT /api/typebots/{id}/move
pub async fn move_form(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<FormId>,
    ApiJson(req): ApiJson<MoveFormRequest>,
) -> Result<Json<ApiResponse<Form>>, ApiError> {
    let form = state.form_service.move_to(&auth, id, req.folder_id).await?;
    Ok(Json(ApiResponse::ok(form)))
}

/// GET /api/typebots/{id}/public
pub async fn get_public(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<FormId>,
) -> Result<Json<ApiResponse<PublicForm>>, ApiError> {
    let form = state.form_service.get_public(id).await?;
    Ok(Json(ApiResponse::ok(form)))
}
