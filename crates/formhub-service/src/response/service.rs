//! Anonymous form submissions and per-form statistics.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::info;

use formhub_core::error::AppError;
use formhub_core::result::AppResult;
use formhub_core::types::FormId;
use formhub_database::ResponseStore;
use formhub_entity::response::{FormResponse, FormStats};

/// Number of submissions returned by [`ResponseService::stats`].
pub const RECENT_RESPONSES_LIMIT: u32 = 10;

/// Records submissions and reports on them.
#[derive(Clone)]
pub struct ResponseService {
    responses: Arc<dyn ResponseStore>,
}

impl std::fmt::Debug for ResponseService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseService").finish_non_exhaustive()
    }
}

impl ResponseService {
    /// Creates a new response service.
    pub fn new(responses: Arc<dyn ResponseStore>) -> Self {
        Self { responses }
    }

    /// Stores a submission as-is.
    ///
    /// Neither the form id nor the answer keys are checked; a submission
    /// for a deleted form is still recorded.
    pub async fn submit(
        &self,
        form_id: FormId,
        answers: &BTreeMap<String, String>,
    ) -> AppResult<FormResponse> {
        let response = self.responses.create(form_id, answers).await?;
        info!(
            form_id = %form_id,
            response_id = %response.id,
            answers = answers.len(),
            "Response submitted"
        );
        Ok(response)
    }

    /// Total submissions plus the newest few, newest first.
    pub async fn stats(&self, form_id: FormId) -> AppResult<FormStats> {
        let total_responses = self.responses.count_for_form(form_id).await?;
        let responses = self
            .responses
            .recent_for_form(form_id, RECENT_RESPONSES_LIMIT)
            .await?;
        Ok(FormStats {
            total_responses,
            responses,
        })
    }
}

/// Flatten a JSON answer object into text answers.
///
/// Null answers become `""` and numbers or booleans are stringified.
pub fn answers_from_json(answers: &Map<String, Value>) -> AppResult<BTreeMap<String, String>> {
    answers
        .iter()
        .map(|(key, value)| {
            let text = match value {
                Value::Null => String::new(),
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => {
                    return Err(AppError::validation(format!(
                        "Answer for '{key}' must be a string"
                    )));
                }
            };
            Ok((key.clone(), text))
        })
        .collect()
}
