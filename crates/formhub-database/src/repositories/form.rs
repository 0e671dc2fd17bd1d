//! Form repository implementation.
//!
//! Folder membership lives in `forms.folder_id` with `filed_seq` recording
//! filing order, so every write that changes membership is a single
//! statement on this table.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;

use formhub_core::error::{AppError, ErrorKind};
use formhub_core::result::AppResult;
use formhub_core::types::{FolderId, FormId};
use formhub_entity::form::{CreateForm, Field, Form};

use super::violated_constraint;
use crate::store::FormStore;

const SCOPE_NAME_KEY: &str = "forms_scope_name_key";
const FOLDER_FKEY: &str = "forms_folder_id_fkey";

const FORM_COLUMNS: &str = "id, name, folder_id, fields, created_at, updated_at";

/// Repository for form persistence.
#[derive(Debug, Clone)]
pub struct FormRepository {
    pool: PgPool,
}

impl FormRepository {
    /// Create a new form repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(e: sqlx::Error, context: &'static str) -> AppError {
    match violated_constraint(&e) {
        Some(SCOPE_NAME_KEY) => AppError::conflict("A typebot with this name already exists"),
        Some(FOLDER_FKEY) => AppError::not_found("Folder not found"),
        _ => AppError::with_source(ErrorKind::Storage, context, e),
    }
}

#[async_trait]
impl FormStore for FormRepository {
    async fn find_by_id(&self, id: FormId) -> AppResult<Option<Form>> {
        sqlx::query_as::<_, Form>(&format!("SELECT {FORM_COLUMNS} FROM forms WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to find typebot", e))
    }

    async fn find_by_name(
        &self,
        folder_id: Option<FolderId>,
        name: &str,
    ) -> AppResult<Option<Form>> {
        sqlx::query_as::<_, Form>(&format!(
            "SELECT {FORM_COLUMNS} FROM forms \
             WHERE folder_id IS NOT DISTINCT FROM $1 AND name = $2"
        ))
        .bind(folder_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to find typebot by name", e)
        })
    }

    async fn list_in_folder(&self, folder_id: FolderId) -> AppResult<Vec<Form>> {
        sqlx::query_as::<_, Form>(&format!(
            "SELECT {FORM_COLUMNS} FROM forms WHERE folder_id = $1 ORDER BY filed_seq ASC"
        ))
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to list folder typebots", e)
        })
    }

    async fn list_unfiled(&self) -> AppResult<Vec<Form>> {
        sqlx::query_as::<_, Form>(&format!(
            "SELECT {FORM_COLUMNS} FROM forms WHERE folder_id IS NULL \
             ORDER BY created_at ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to list unfiled typebots", e)
        })
    }

    async fn create(&self, data: &CreateForm) -> AppResult<Form> {
        sqlx::query_as::<_, Form>(&format!(
            "INSERT INTO forms (id, name, folder_id, filed_seq) \
             VALUES ($1, $2, $3, \
                CASE WHEN $3::uuid IS NULL THEN NULL ELSE nextval('form_filing_seq') END) \
             RETURNING {FORM_COLUMNS}"
        ))
        .bind(FormId::new())
        .bind(&data.name)
        .bind(data.folder_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to create typebot"))
    }

    async fn rename(&self, id: FormId, name: &str) -> AppResult<Form> {
        sqlx::query_as::<_, Form>(&format!(
            "UPDATE forms SET name = $2, updated_at = NOW() WHERE id = $1 \
             RETURNING {FORM_COLUMNS}"
        ))
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to rename typebot"))?
        .ok_or_else(|| AppError::not_found("Typebot not found"))
    }

    async fn replace_fields(&self, id: FormId, fields: &[Field]) -> AppResult<Form> {
        sqlx::query_as::<_, Form>(&format!(
            "UPDATE forms SET fields = $2, updated_at = NOW() WHERE id = $1 \
             RETURNING {FORM_COLUMNS}"
        ))
        .bind(id)
        .bind(Json(fields))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to save fields", e))?
        .ok_or_else(|| AppError::not_found("Typebot not found"))
    }

    async fn move_to(&self, id: FormId, folder_id: Option<FolderId>) -> AppResult<Form> {
        // SET expressions see the pre-update row, so an unchanged scope keeps
        // its filing position and a new folder appends at the end.
        sqlx::query_as::<_, Form>(&format!(
            "UPDATE forms SET \
                filed_seq = CASE \
                    WHEN $2::uuid IS NULL THEN NULL \
                    WHEN folder_id IS NOT DISTINCT FROM $2::uuid THEN filed_seq \
                    ELSE nextval('form_filing_seq') END, \
                folder_id = $2, \
                updated_at = NOW() \
             WHERE id = $1 RETURNING {FORM_COLUMNS}"
        ))
        .bind(id)
        .bind(folder_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to move typebot"))?
        .ok_or_else(|| AppError::not_found("Typebot not found"))
    }

    async fn delete(&self, id: FormId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM forms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to delete typebot", e))?;
        Ok(result.rows_affected() > 0)
    }
}
