//! Store traits implemented by every persistence backend.
//!
//! Each method is one atomic unit. Operations that touch both a folder and
//! its forms (filing a new form, moving a form, deleting a folder) are single
//! methods here so a backend can run them under one transaction or lock;
//! callers must not compose them from smaller reads and writes.
//!
//! Uniqueness is enforced inside the store, not by the caller's pre-checks:
//! two racing creates of the same name yield one success and one
//! [`ErrorKind::Conflict`](formhub_core::error::ErrorKind::Conflict).

use std::collections::BTreeMap;

use async_trait::async_trait;

use formhub_core::result::AppResult;
use formhub_core::types::{FolderId, FormId, UserId};
use formhub_entity::folder::Folder;
use formhub_entity::form::{CreateForm, Field, Form};
use formhub_entity::response::FormResponse;
use formhub_entity::user::{CreateUser, UpdateProfile, User};

/// User persistence.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find a user by normalized email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a user by username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Insert a user. `Conflict` if the email or username is taken.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Replace username and email. `Conflict` if either belongs to another
    /// user, `NotFound` if the user is gone.
    async fn update_profile(&self, id: UserId, data: &UpdateProfile) -> AppResult<User>;

    /// Replace the stored password hash.
    async fn update_password(&self, id: UserId, password_hash: &str) -> AppResult<()>;
}

/// Folder persistence.
#[async_trait]
pub trait FolderStore: Send + Sync + 'static {
    /// All folders, oldest first, with derived member lists.
    async fn list(&self) -> AppResult<Vec<Folder>>;

    /// Find a folder by primary key.
    async fn find_by_id(&self, id: FolderId) -> AppResult<Option<Folder>>;

    /// Find a folder by exact name.
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Folder>>;

    /// Insert an empty folder. `Conflict` on a duplicate name.
    async fn create(&self, name: &str) -> AppResult<Folder>;

    /// Rename a folder. `Conflict` if another folder has the name.
    async fn rename(&self, id: FolderId, name: &str) -> AppResult<Folder>;

    /// Unfile every member form and delete the folder, all or nothing.
    ///
    /// Returns the ids of the forms that became unfiled. Fails with
    /// `Conflict` (and changes nothing) if a member's name is already used
    /// by an unfiled form.
    async fn delete(&self, id: FolderId) -> AppResult<Vec<FormId>>;
}

/// Form persistence, including folder membership.
#[async_trait]
pub trait FormStore: Send + Sync + 'static {
    /// Find a form by primary key.
    async fn find_by_id(&self, id: FormId) -> AppResult<Option<Form>>;

    /// Find a form by name within a scope (`None` is the unfiled scope).
    async fn find_by_name(
        &self,
        folder_id: Option<FolderId>,
        name: &str,
    ) -> AppResult<Option<Form>>;

    /// Member forms of a folder in filing order.
    async fn list_in_folder(&self, folder_id: FolderId) -> AppResult<Vec<Form>>;

    /// Forms outside any folder, oldest first.
    async fn list_unfiled(&self) -> AppResult<Vec<Form>>;

    /// Insert a form with no fields, filing it into `data.folder_id` in the
    /// same step. `NotFound` if the folder is missing, `Conflict` if the
    /// name is taken in that scope.
    async fn create(&self, data: &CreateForm) -> AppResult<Form>;

    /// Rename a form within its current scope.
    async fn rename(&self, id: FormId, name: &str) -> AppResult<Form>;

    /// Replace the whole field list.
    async fn replace_fields(&self, id: FormId, fields: &[Field]) -> AppResult<Form>;

    /// File a form into another folder (appended last) or unfile it with
    /// `None`. Moving into the current scope keeps its position.
    async fn move_to(&self, id: FormId, folder_id: Option<FolderId>) -> AppResult<Form>;

    /// Delete a form, which also drops it from its folder. Returns `false`
    /// if no such form existed.
    async fn delete(&self, id: FormId) -> AppResult<bool>;
}

/// Form response persistence.
#[async_trait]
pub trait ResponseStore: Send + Sync + 'static {
    /// Record a submission as-is.
    async fn create(
        &self,
        form_id: FormId,
        responses: &BTreeMap<String, String>,
    ) -> AppResult<FormResponse>;

    /// Count all submissions for a form.
    async fn count_for_form(&self, form_id: FormId) -> AppResult<u64>;

    /// Newest submissions for a form, at most `limit`.
    async fn recent_for_form(&self, form_id: FormId, limit: u32) -> AppResult<Vec<FormResponse>>;
}
