//! Folder handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use formhub_core::types::FolderId;
use formhub_entity::folder::{Folder, FolderWithForms};
use formhub_entity::form::Form;

use crate::dto::request::{NameRequest, validate_request};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiPath, AuthUser};
use crate::state::AppState;

/// GET /api/folders
pub async fn list_folders(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<FolderWithForms>>>, ApiError> {
    let folders = state.folder_service.list(&auth).await?;
    Ok(Json(ApiResponse::ok(folders)))
}

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<NameRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Folder>>), ApiError> {
    validate_request(&req)?;
    let folder = state.folder_service.create(&auth, &req.name).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(folder))))
}

/// GET /api/folders/{id}
pub async fn get_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<FolderId>,
) -> Result<Json<ApiResponse<Folder>>, ApiError> {
    let folder = state.folder_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// PUT /api/folders/{id}
pub async fn rename_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<FolderId>,
    ApiJson(req): ApiJson<NameRequest>,
) -> Result<Json<ApiResponse<Folder>>, ApiError> {
    validate_request(&req)?;
    let folder = state.folder_service.rename(&auth, id, &req.name).await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// DELETE /api/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<FolderId>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.folder_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Folder deleted"))))
}

/// GET /api/folders/{id}/typebots
pub async fn list_folder_forms(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<FolderId>,
) -> Result<Json<ApiResponse<Vec<Form>>>, ApiError> {
    let forms = state.folder_service.list_forms(&auth, id).await?;
    Ok(Json(ApiResponse::ok(forms)))
}

/// POST /api/folders/{id}/typebots
pub async fn create_folder_form(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<FolderId>,
    ApiJson(req): ApiJson<NameRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Form>>), ApiError> {
    validate_request(&req)?;
    let form = state
        .form_service
        .create_in_folder(&auth, id, &req.name)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(form))))
}
