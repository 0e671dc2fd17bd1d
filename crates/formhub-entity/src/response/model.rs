//! Form response entity model.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use formhub_core::types::{FormId, ResponseId};

/// One anonymous submission against a form.
///
/// `form_id` is not checked against existing forms, and answer keys are not
/// checked against the form's current fields, so old submissions survive
/// later edits and deletions.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FormResponse {
    /// Unique response identifier.
    pub id: ResponseId,
    /// The form this response was submitted to.
    pub form_id: FormId,
    /// Answers keyed by field id.
    #[sqlx(json)]
    pub responses: BTreeMap<String, String>,
    /// Submission time.
    pub created_at: DateTime<Utc>,
}

/// Aggregate view of a form's responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormStats {
    /// Total number of submissions.
    pub total_responses: u64,
    /// Newest submissions first, capped at a fixed window.
    pub responses: Vec<FormResponse>,
}
