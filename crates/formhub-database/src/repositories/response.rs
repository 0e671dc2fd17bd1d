//! Form response repository implementation.

use std::collections::BTreeMap;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;

use formhub_core::error::{AppError, ErrorKind};
use formhub_core::result::AppResult;
use formhub_core::types::{FormId, ResponseId};
use formhub_entity::response::FormResponse;

use crate::store::ResponseStore;

/// Repository for form responses.
#[derive(Debug, Clone)]
pub struct ResponseRepository {
    pool: PgPool,
}

impl ResponseRepository {
    /// Create a new response repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResponseStore for ResponseRepository {
    async fn create(
        &self,
        form_id: FormId,
        responses: &BTreeMap<String, String>,
    ) -> AppResult<FormResponse> {
        sqlx::query_as::<_, FormResponse>(
            "INSERT INTO form_responses (id, form_id, responses) VALUES ($1, $2, $3) \
             RETURNING id, form_id, responses, created_at",
        )
        .bind(ResponseId::new())
        .bind(form_id)
        .bind(Json(responses))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to store response", e))
    }

    async fn count_for_form(&self, form_id: FormId) -> AppResult<u64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM form_responses WHERE form_id = $1")
                .bind(form_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Storage, "Failed to count responses", e)
                })?;
        Ok(count.max(0) as u64)
    }

    async fn recent_for_form(&self, form_id: FormId, limit: u32) -> AppResult<Vec<FormResponse>> {
        sqlx::query_as::<_, FormResponse>(
            "SELECT id, form_id, responses, created_at FROM form_responses \
             WHERE form_id = $1 ORDER BY created_at DESC, id DESC LIMIT $2",
        )
        .bind(form_id)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to load responses", e))
    }
}
