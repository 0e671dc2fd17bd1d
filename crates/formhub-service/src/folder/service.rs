//! Folder CRUD operations.

use std::sync::Arc;

use tracing::info;

use formhub_core::error::AppError;
use formhub_core::result::AppResult;
use formhub_core::types::FolderId;
use formhub_database::{FolderStore, FormStore};
use formhub_entity::folder::{Folder, FolderWithForms};
use formhub_entity::form::Form;

use crate::context::RequestContext;
use crate::naming::clean_name;

/// Manages folders and their uniqueness rule.
#[derive(Clone)]
pub struct FolderService {
    /// Folder persistence.
    folders: Arc<dyn FolderStore>,
    /// Form persistence, for member listings.
    forms: Arc<dyn FormStore>,
}

impl std::fmt::Debug for FolderService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FolderService").finish_non_exhaustive()
    }
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(folders: Arc<dyn FolderStore>, forms: Arc<dyn FormStore>) -> Self {
        Self { folders, forms }
    }

    /// Lists every folder together with its member typebots.
    pub async fn list(&self, _ctx: &RequestContext) -> AppResult<Vec<FolderWithForms>> {
        let folders = self.folders.list().await?;
        let mut listed = Vec::with_capacity(folders.len());
        for folder in folders {
            let forms = self.forms.list_in_folder(folder.id).await?;
            listed.push(FolderWithForms { folder, forms });
        }
        Ok(listed)
    }

    /// Gets a folder by ID.
    pub async fn get(&self, _ctx: &RequestContext, folder_id: FolderId) -> AppResult<Folder> {
        self.folders
            .find_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    /// Lists the typebots filed in a folder, in filing order.
    pub async fn list_forms(&self, ctx: &RequestContext, folder_id: FolderId) -> AppResult<Vec<Form>> {
        self.get(ctx, folder_id).await?;
        self.forms.list_in_folder(folder_id).await
    }

    /// Creates an empty folder.
    pub async fn create(&self, ctx: &RequestContext, name: &str) -> AppResult<Folder> {
        let name = clean_name(name, "Folder")?;

        if self.folders.find_by_name(&name).await?.is_some() {
            return Err(AppError::conflict("Folder with this name already exists"));
        }

        let folder = self.folders.create(&name).await?;
        info!(
            user_id = %ctx.user_id,
            username = %ctx.username,
            folder_id = %folder.id,
            name = %folder.name,
            "Folder created"
        );
        Ok(folder)
    }

    /// Renames a folder. Member typebots are untouched.
    pub async fn rename(
        &self,
        ctx: &RequestContext,
        folder_id: FolderId,
        name: &str,
    ) -> AppResult<Folder> {
        let name = clean_name(name, "Folder")?;
        let current = self.get(ctx, folder_id).await?;

        if let Some(other) = self.folders.find_by_name(&name).await? {
            if other.id != folder_id {
                return Err(AppError::conflict("Folder with this name already exists"));
            }
        }

        let folder = self.folders.rename(folder_id, &name).await?;
        info!(
            user_id = %ctx.user_id,
            username = %ctx.username,
            folder_id = %folder_id,
            old_name = %current.name,
            new_name = %folder.name,
            "Folder renamed"
        );
        Ok(folder)
    }

    /// Deletes a folder, moving its typebots to the unfiled scope.
    pub async fn delete(&self, ctx: &RequestContext, folder_id: FolderId) -> AppResult<()> {
        let unfiled = self.folders.delete(folder_id).await?;
        info!(
            user_id = %ctx.user_id,
            username = %ctx.username,
            folder_id = %folder_id,
            unfiled = unfiled.len(),
            "Folder deleted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formhub_core::error::ErrorKind;
    use formhub_core::types::UserId;
    use formhub_database::StoreManager;

    use crate::form::FormService;

    fn services() -> (FolderService, FormService) {
        let stores = StoreManager::memory();
        (
            FolderService::new(stores.folders.clone(), stores.forms.clone()),
            FormService::new(stores.forms.clone(), stores.folders.clone()),
        )
    }

    fn ctx() -> RequestContext {
        RequestContext::new(UserId::new(), "tester")
    }

    #[tokio::test]
    async fn test_duplicate_folder_name_conflicts() {
        let (folders, _) = services();
        folders.create(&ctx(), "Surveys").await.unwrap();
        let err = folders.create(&ctx(), " Surveys ").await.unwrap_err();
        assert!(err.is(ErrorKind::Conflict));
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let (folders, _) = services();
        let err = folders.create(&ctx(), "  ").await.unwrap_err();
        assert!(err.is(ErrorKind::Validation));
    }

    #[tokio::test]
    async fn test_concurrent_creates_yield_one_conflict() {
        let (folders, _) = services();
        let ctx = ctx();
        let (a, b) = tokio::join!(folders.create(&ctx, "Race"), folders.create(&ctx, "Race"));
        let results = [a, b];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(
            results
                .iter()
                .filter_map(|r| r.as_ref().err())
                .all(|e| e.is(ErrorKind::Conflict))
        );
    }

    #[tokio::test]
    async fn test_rename_to_own_name_allowed() {
        let (folders, _) = services();
        let folder = folders.create(&ctx(), "Surveys").await.unwrap();
        let renamed = folders.rename(&ctx(), folder.id, "Surveys").await.unwrap();
        assert_eq!(renamed.name, "Surveys");

        folders.create(&ctx(), "Other").await.unwrap();
        let err = folders.rename(&ctx(), folder.id, "Other").await.unwrap_err();
        assert!(err.is(ErrorKind::Conflict));
    }

    #[tokio::test]
    async fn test_rename_missing_folder() {
        let (folders, _) = services();
        let err = folders
            .rename(&ctx(), FolderId::new(), "Anything")
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_surveys_scenario() {
        let (folders, forms) = services();
        let ctx = ctx();

        let folder = folders.create(&ctx, "Surveys").await.unwrap();
        let nps = forms.create_in_folder(&ctx, folder.id, "NPS").await.unwrap();

        folders.rename(&ctx, folder.id, "Surveys2").await.unwrap();
        let listed = folders.list_forms(&ctx, folder.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "NPS");

        folders.delete(&ctx, folder.id).await.unwrap();
        let nps = forms.get(&ctx, nps.id).await.unwrap();
        assert!(nps.is_unfiled());
        assert!(folders.get(&ctx, folder.id).await.unwrap_err().is(ErrorKind::NotFound));
        let unfiled = forms.list_unfiled(&ctx).await.unwrap();
        assert_eq!(unfiled.iter().map(|f| f.id).collect::<Vec<_>>(), vec![nps.id]);
    }

    #[tokio::test]
    async fn test_delete_rejected_on_unfiled_name_clash() {
        let (folders, forms) = services();
        let ctx = ctx();
        let folder = folders.create(&ctx, "Surveys").await.unwrap();
        forms.create_in_folder(&ctx, folder.id, "NPS").await.unwrap();
        forms.create_unfiled(&ctx, "NPS").await.unwrap();

        let err = folders.delete(&ctx, folder.id).await.unwrap_err();
        assert!(err.is(ErrorKind::Conflict));
        assert_eq!(folders.get(&ctx, folder.id).await.unwrap().form_ids.len(), 1);
    }

    #[tokio::test]
    async fn test_list_joins_members() {
        let (folders, forms) = services();
        let ctx = ctx();
        let a = folders.create(&ctx, "A").await.unwrap();
        folders.create(&ctx, "B").await.unwrap();
        forms.create_in_folder(&ctx, a.id, "One").await.unwrap();
        forms.create_in_folder(&ctx, a.id, "Two").await.unwrap();

        let listed = folders.list(&ctx).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].folder.name, "A");
        let names: Vec<_> = listed[0].forms.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["One", "Two"]);
        assert!(listed[1].forms.is_empty());
    }
}
