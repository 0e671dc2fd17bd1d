//! Folder repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use formhub_core::error::{AppError, ErrorKind};
use formhub_core::result::AppResult;
use formhub_core::types::{FolderId, FormId};
use formhub_entity::folder::Folder;

use super::violated_constraint;
use crate::store::FolderStore;

const FOLDER_NAME_KEY: &str = "folders_name_key";
const FORM_SCOPE_NAME_KEY: &str = "forms_scope_name_key";

/// Folder columns with the member list derived from `forms.folder_id`.
/// Expects the folder relation to be aliased `f`.
const FOLDER_COLUMNS: &str = "f.id, f.name, f.created_at, f.updated_at, \
     ARRAY(SELECT m.id FROM forms m WHERE m.folder_id = f.id ORDER BY m.filed_seq) AS form_ids";

/// Repository for folder persistence.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(e: sqlx::Error, context: &'static str) -> AppError {
    match violated_constraint(&e) {
        Some(FOLDER_NAME_KEY) => AppError::conflict("Folder with this name already exists"),
        _ => AppError::with_source(ErrorKind::Storage, context, e),
    }
}

#[async_trait]
impl FolderStore for FolderRepository {
    async fn list(&self) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(&format!(
            "SELECT {FOLDER_COLUMNS} FROM folders f ORDER BY f.created_at ASC, f.id ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to list folders", e))
    }

    async fn find_by_id(&self, id: FolderId) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(&format!(
            "SELECT {FOLDER_COLUMNS} FROM folders f WHERE f.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to find folder", e))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(&format!(
            "SELECT {FOLDER_COLUMNS} FROM folders f WHERE f.name = $1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to find folder by name", e)
        })
    }

    async fn create(&self, name: &str) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (id, name) VALUES ($1, $2) \
             RETURNING id, name, created_at, updated_at, ARRAY[]::uuid[] AS form_ids",
        )
        .bind(FolderId::new())
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to create folder"))
    }

    async fn rename(&self, id: FolderId, name: &str) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(&format!(
            "WITH f AS ( \
                UPDATE folders SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING * \
             ) SELECT {FOLDER_COLUMNS} FROM f"
        ))
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to rename folder"))?
        .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    async fn delete(&self, id: FolderId) -> AppResult<Vec<FormId>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to start transaction", e)
        })?;

        // Row lock blocks concurrent filing into this folder until we finish.
        let locked: Option<FolderId> =
            sqlx::query_scalar("SELECT id FROM folders WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Storage, "Failed to lock folder", e)
                })?;

        if locked.is_none() {
            return Err(AppError::not_found("Folder not found"));
        }

        let unfiled: Vec<FormId> = sqlx::query_scalar(
            "UPDATE forms SET folder_id = NULL, filed_seq = NULL, updated_at = NOW() \
             WHERE folder_id = $1 RETURNING id",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| match violated_constraint(&e) {
            Some(FORM_SCOPE_NAME_KEY) => AppError::conflict(
                "Folder contains a typebot whose name is already used by an unfiled typebot",
            ),
            _ => AppError::with_source(ErrorKind::Storage, "Failed to unfile folder members", e),
        })?;

        sqlx::query("DELETE FROM folders WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to delete folder", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to commit folder deletion", e)
        })?;

        debug!(folder_id = %id, unfiled = unfiled.len(), "Folder row deleted");
        Ok(unfiled)
    }
}
