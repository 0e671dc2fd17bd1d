//! Form entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use formhub_core::types::{FolderId, FormId};

use super::field::Field;

/// A form (typebot): a named, ordered list of fields.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Form {
    /// Unique form identifier.
    pub id: FormId,
    /// Form name, unique within its folder (or among unfiled forms).
    pub name: String,
    /// Owning folder; `None` means unfiled.
    pub folder_id: Option<FolderId>,
    /// Ordered field list.
    #[sqlx(json)]
    pub fields: Vec<Field>,
    /// When the form was created.
    pub created_at: DateTime<Utc>,
    /// When the form was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Form {
    /// Check whether this form sits outside any folder.
    pub fn is_unfiled(&self) -> bool {
        self.folder_id.is_none()
    }
}

/// Data required to create a new form.
#[derive(Debug, Clone)]
pub struct CreateForm {
    /// Trimmed form name.
    pub name: String,
    /// Target folder; `None` creates an unfiled form.
    pub folder_id: Option<FolderId>,
}

/// What an anonymous respondent needs to render a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicForm {
    /// Form name.
    pub name: String,
    /// Fields in display order.
    pub fields: Vec<Field>,
}

impl From<&Form> for PublicForm {
    fn from(form: &Form) -> Self {
        Self {
            name: form.name.clone(),
            fields: form.fields.clone(),
        }
    }
}
