//! Typebot CRUD, field editing, and folder membership changes.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use formhub_core::error::AppError;
use formhub_core::result::AppResult;
use formhub_core::types::{FolderId, FormId};
use formhub_database::{FolderStore, FormStore};
use formhub_entity::form::{CreateForm, Form, PublicForm};

use super::fields::sanitize_fields;
use crate::context::RequestContext;
use crate::naming::clean_name;

/// Manages typebots and keeps folder membership consistent.
///
/// Membership is stored only on the typebot, so filing, moving and
/// deleting are each one store write; the pre-checks here exist to return
/// a precise error before that write is attempted.
#[derive(Clone)]
pub struct FormService {
    /// Form persistence.
    forms: Arc<dyn FormStore>,
    /// Folder persistence, for existence checks.
    folders: Arc<dyn FolderStore>,
}

impl std::fmt::Debug for FormService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormService").finish_non_exhaustive()
    }
}

impl FormService {
    /// Creates a new form service.
    pub fn new(forms: Arc<dyn FormStore>, folders: Arc<dyn FolderStore>) -> Self {
        Self { forms, folders }
    }

    /// Gets a typebot by ID.
    pub async fn get(&self, _ctx: &RequestContext, form_id: FormId) -> AppResult<Form> {
        self.find(form_id).await
    }

    /// The anonymous view of a typebot: its name and fields only.
    pub async fn get_public(&self, form_id: FormId) -> AppResult<PublicForm> {
        let form = self.find(form_id).await?;
        Ok(PublicForm::from(&form))
    }

    /// Lists typebots outside any folder.
    pub async fn list_unfiled(&self, _ctx: &RequestContext) -> AppResult<Vec<Form>> {
        self.forms.list_unfiled().await
    }

    /// Creates an empty typebot filed in the given folder.
    pub async fn create_in_folder(
        &self,
        ctx: &RequestContext,
        folder_id: FolderId,
        name: &str,
    ) -> AppResult<Form> {
        let name = clean_name(name, "Typebot")?;
        self.require_folder(folder_id).await?;

        if self.forms.find_by_name(Some(folder_id), &name).await?.is_some() {
            return Err(AppError::conflict(
                "A typebot with this name already exists in this folder",
            ));
        }

        let form = self
            .forms
            .create(&CreateForm {
                name,
                folder_id: Some(folder_id),
            })
            .await?;
        info!(
            user_id = %ctx.user_id,
            username = %ctx.username,
            form_id = %form.id,
            folder_id = %folder_id,
            name = %form.name,
            "Typebot created in folder"
        );
        Ok(form)
    }

    /// Creates an empty unfiled typebot.
    pub async fn create_unfiled(&self, ctx: &RequestContext, name: &str) -> AppResult<Form> {
        let name = clean_name(name, "Typebot")?;

        if self.forms.find_by_name(None, &name).await?.is_some() {
            return Err(AppError::conflict("A typebot with this name already exists"));
        }

        let form = self
            .forms
            .create(&CreateForm {
                name,
                folder_id: None,
            })
            .await?;
        info!(
            user_id = %ctx.user_id,
            username = %ctx.username,
            form_id = %form.id,
            name = %form.name,
            "Typebot created"
        );
        Ok(form)
    }

    /// Replaces a typebot's fields with the sanitized editor payload.
    pub async fn set_fields(
        &self,
        ctx: &RequestContext,
        form_id: FormId,
        fields: &Value,
    ) -> AppResult<Form> {
        let fields = sanitize_fields(fields)?;
        let form = self.forms.replace_fields(form_id, &fields).await?;
        info!(
            user_id = %ctx.user_id,
            username = %ctx.username,
            form_id = %form_id,
            field_count = form.fields.len(),
            "Typebot fields saved"
        );
        Ok(form)
    }

    /// Renames a typebot within its current scope.
    pub async fn rename(&self, ctx: &RequestContext, form_id: FormId, name: &str) -> AppResult<Form> {
        let name = clean_name(name, "Typebot")?;
        let current = self.find(form_id).await?;

        if let Some(other) = self.forms.find_by_name(current.folder_id, &name).await? {
            if other.id != form_id {
                return Err(AppError::conflict("A typebot with this name already exists"));
            }
        }

        let form = self.forms.rename(form_id, &name).await?;
        info!(
            user_id = %ctx.user_id,
            username = %ctx.username,
            form_id = %form_id,
            old_name = %current.name,
            new_name = %form.name,
            "Typebot renamed"
        );
        Ok(form)
    }

    /// Deletes a typebot. Its responses are kept.
    pub async fn delete(&self, ctx: &RequestContext, form_id: FormId) -> AppResult<()> {
        if !self.forms.delete(form_id).await? {
            return Err(AppError::not_found("Typebot not found"));
        }
        info!(
            user_id = %ctx.user_id,
            username = %ctx.username,
            form_id = %form_id,
            "Typebot deleted"
        );
        Ok(())
    }

    /// Files a typebot into a folder (last position) or unfiles it.
    pub async fn move_to(
        &self,
        ctx: &RequestContext,
        form_id: FormId,
        folder_id: Option<FolderId>,
    ) -> AppResult<Form> {
        let current = self.find(form_id).await?;
        if current.folder_id == folder_id {
            return Ok(current);
        }
        if let Some(target) = folder_id {
            self.require_folder(target).await?;
        }
        if self.forms.find_by_name(folder_id, &current.name).await?.is_some() {
            return Err(AppError::conflict(
                "A typebot with this name already exists in the target folder",
            ));
        }

        let form = self.forms.move_to(form_id, folder_id).await?;
        info!(
            user_id = %ctx.user_id,
            username = %ctx.username,
            form_id = %form_id,
            from = ?current.folder_id,
            to = ?folder_id,
            "Typebot moved"
        );
        Ok(form)
    }

    async fn find(&self, form_id: FormId) -> AppResult<Form> {
        self.forms
            .find_by_id(form_id)
            .await?
            .ok_or_else(|| AppError::not_found("Typebot not found"))
    }

    async fn require_folder(&self, folder_id: FolderId) -> AppResult<()> {
        match self.folders.find_by_id(folder_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found("Folder not found")),
        }
    }
}
