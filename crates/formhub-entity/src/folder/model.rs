//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use formhub_core::types::{FolderId, FormId};

use crate::form::Form;

/// A named group of forms.
///
/// `form_ids` is never written directly. Membership is recorded once, on
/// each form's `folder_id`, and every store derives this list from it in
/// filing order, so a folder can never list a form that points elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Folder name, unique across all folders.
    pub name: String,
    /// Member forms, in the order they were filed into this folder.
    pub form_ids: Vec<FormId>,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last renamed.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Check whether the given form is filed in this folder.
    pub fn contains(&self, form_id: FormId) -> bool {
        self.form_ids.contains(&form_id)
    }
}

/// A folder joined with its member forms, for listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderWithForms {
    /// The folder itself.
    #[serde(flatten)]
    pub folder: Folder,
    /// Member forms in filing order.
    pub forms: Vec<Form>,
}
