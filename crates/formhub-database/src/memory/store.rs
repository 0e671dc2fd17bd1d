//! In-memory implementation of every store trait.
//!
//! All collections sit behind one [`RwLock`]. Each trait method takes the
//! write guard once, checks its uniqueness rules and mutates before
//! releasing it, which gives the same all-or-nothing behaviour the
//! PostgreSQL repositories get from constraints and transactions.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use formhub_core::error::AppError;
use formhub_core::result::AppResult;
use formhub_core::types::{FolderId, FormId, ResponseId, UserId};
use formhub_entity::folder::Folder;
use formhub_entity::form::{CreateForm, Field, Form};
use formhub_entity::response::FormResponse;
use formhub_entity::user::{CreateUser, UpdateProfile, User};

use crate::store::{FolderStore, FormStore, ResponseStore, UserStore};

#[derive(Debug)]
struct StoredFolder {
    folder: Folder,
    seq: u64,
}

#[derive(Debug)]
struct StoredForm {
    form: Form,
    seq: u64,
    /// Position within the owning folder; `None` while unfiled.
    filed_seq: Option<u64>,
}

#[derive(Debug, Default)]
struct MemoryState {
    users: HashMap<UserId, User>,
    folders: HashMap<FolderId, StoredFolder>,
    forms: HashMap<FormId, StoredForm>,
    /// Insertion order, oldest first.
    responses: Vec<FormResponse>,
    next_seq: u64,
}

impl MemoryState {
    fn next_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    fn member_ids(&self, folder_id: FolderId) -> Vec<FormId> {
        let mut members: Vec<(u64, FormId)> = self
            .forms
            .values()
            .filter(|f| f.form.folder_id == Some(folder_id))
            .map(|f| (f.filed_seq.unwrap_or_default(), f.form.id))
            .collect();
        members.sort_unstable();
        members.into_iter().map(|(_, id)| id).collect()
    }

    fn materialize(&self, stored: &StoredFolder) -> Folder {
        Folder {
            form_ids: self.member_ids(stored.folder.id),
            ..stored.folder.clone()
        }
    }

    fn folder_name_taken(&self, name: &str, except: Option<FolderId>) -> bool {
        self.folders
            .values()
            .any(|f| f.folder.name == name && Some(f.folder.id) != except)
    }

    fn form_name_taken(&self, scope: Option<FolderId>, name: &str, except: Option<FormId>) -> bool {
        self.forms.values().any(|f| {
            f.form.folder_id == scope && f.form.name == name && Some(f.form.id) != except
        })
    }

    fn user_conflict(&self, username: &str, email: &str, except: Option<UserId>) -> Option<AppError> {
        for user in self.users.values().filter(|u| Some(u.id) != except) {
            if user.email == email {
                return Some(AppError::conflict("Email already in use"));
            }
            if user.username == username {
                return Some(AppError::conflict("Username already taken"));
            }
        }
        None
    }
}

/// Store that keeps everything in process memory.
///
/// Cloning is cheap and every clone shares the same data, so one instance
/// can back all four store traits.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.username == username).cloned())
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut state = self.state.write().await;
        if let Some(err) = state.user_conflict(&data.username, &data.email, None) {
            return Err(err);
        }

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            username: data.username.clone(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_profile(&self, id: UserId, data: &UpdateProfile) -> AppResult<User> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&id) {
            return Err(AppError::not_found("User not found"));
        }
        if let Some(err) = state.user_conflict(&data.username, &data.email, Some(id)) {
            return Err(err);
        }

        let user = state
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("User not found"))?;
        user.username = data.username.clone();
        user.email = data.email.clone();
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn update_password(&self, id: UserId, password_hash: &str) -> AppResult<()> {
        let mut state = self.state.write().await;
        let user = state
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("User not found"))?;
        user.password_hash = password_hash.to_string();
        user.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl FolderStore for MemoryStore {
    async fn list(&self) -> AppResult<Vec<Folder>> {
        let state = self.state.read().await;
        let mut stored: Vec<&StoredFolder> = state.folders.values().collect();
        stored.sort_by_key(|f| f.seq);
        Ok(stored.into_iter().map(|f| state.materialize(f)).collect())
    }

    async fn find_by_id(&self, id: FolderId) -> AppResult<Option<Folder>> {
        let state = self.state.read().await;
        Ok(state.folders.get(&id).map(|f| state.materialize(f)))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Folder>> {
        let state = self.state.read().await;
        Ok(state
            .folders
            .values()
            .find(|f| f.folder.name == name)
            .map(|f| state.materialize(f)))
    }

    async fn create(&self, name: &str) -> AppResult<Folder> {
        let mut state = self.state.write().await;
        if state.folder_name_taken(name, None) {
            return Err(AppError::conflict("Folder with this name already exists"));
        }

        let now = Utc::now();
        let folder = Folder {
            id: FolderId::new(),
            name: name.to_string(),
            form_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        let seq = state.next_seq();
        state.folders.insert(
            folder.id,
            StoredFolder {
                folder: folder.clone(),
                seq,
            },
        );
        Ok(folder)
    }

    async fn rename(&self, id: FolderId, name: &str) -> AppResult<Folder> {
        let mut state = self.state.write().await;
        if !state.folders.contains_key(&id) {
            return Err(AppError::not_found("Folder not found"));
        }
        if state.folder_name_taken(name, Some(id)) {
            return Err(AppError::conflict("Folder with this name already exists"));
        }

        if let Some(stored) = state.folders.get_mut(&id) {
            stored.folder.name = name.to_string();
            stored.folder.updated_at = Utc::now();
        }
        let stored = state
            .folders
            .get(&id)
            .ok_or_else(|| AppError::not_found("Folder not found"))?;
        Ok(state.materialize(stored))
    }

    async fn delete(&self, id: FolderId) -> AppResult<Vec<FormId>> {
        let mut state = self.state.write().await;
        if !state.folders.contains_key(&id) {
            return Err(AppError::not_found("Folder not found"));
        }

        let members = state.member_ids(id);
        let collides = members.iter().any(|form_id| {
            state
                .forms
                .get(form_id)
                .is_some_and(|f| state.form_name_taken(None, &f.form.name, Some(*form_id)))
        });
        if collides {
            return Err(AppError::conflict(
                "Folder contains a typebot whose name is already used by an unfiled typebot",
            ));
        }

        let now = Utc::now();
        for form_id in &members {
            if let Some(stored) = state.forms.get_mut(form_id) {
                stored.form.folder_id = None;
                stored.form.updated_at = now;
                stored.filed_seq = None;
            }
        }
        state.folders.remove(&id);

        debug!(folder_id = %id, unfiled = members.len(), "Folder removed from memory store");
        Ok(members)
    }
}

#[async_trait]
impl FormStore for MemoryStore {
    async fn find_by_id(&self, id: FormId) -> AppResult<Option<Form>> {
        Ok(self.state.read().await.forms.get(&id).map(|f| f.form.clone()))
    }

    async fn find_by_name(
        &self,
        folder_id: Option<FolderId>,
        name: &str,
    ) -> AppResult<Option<Form>> {
        let state = self.state.read().await;
        Ok(state
            .forms
            .values()
            .find(|f| f.form.folder_id == folder_id && f.form.name == name)
            .map(|f| f.form.clone()))
    }

    async fn list_in_folder(&self, folder_id: FolderId) -> AppResult<Vec<Form>> {
        let state = self.state.read().await;
        Ok(state
            .member_ids(folder_id)
            .iter()
            .filter_map(|id| state.forms.get(id))
            .map(|f| f.form.clone())
            .collect())
    }

    async fn list_unfiled(&self) -> AppResult<Vec<Form>> {
        let state = self.state.read().await;
        let mut unfiled: Vec<&StoredForm> = state
            .forms
            .values()
            .filter(|f| f.form.folder_id.is_none())
            .collect();
        unfiled.sort_by_key(|f| f.seq);
        Ok(unfiled.into_iter().map(|f| f.form.clone()).collect())
    }

    async fn create(&self, data: &CreateForm) -> AppResult<Form> {
        let mut state = self.state.write().await;
        if let Some(folder_id) = data.folder_id {
            if !state.folders.contains_key(&folder_id) {
                return Err(AppError::not_found("Folder not found"));
            }
        }
        if state.form_name_taken(data.folder_id, &data.name, None) {
            return Err(AppError::conflict("A typebot with this name already exists"));
        }

        let now = Utc::now();
        let form = Form {
            id: FormId::new(),
            name: data.name.clone(),
            folder_id: data.folder_id,
            fields: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        let seq = state.next_seq();
        state.forms.insert(
            form.id,
            StoredForm {
                form: form.clone(),
                seq,
                filed_seq: data.folder_id.map(|_| seq),
            },
        );
        Ok(form)
    }

    async fn rename(&self, id: FormId, name: &str) -> AppResult<Form> {
        let mut state = self.state.write().await;
        let scope = state
            .forms
            .get(&id)
            .map(|f| f.form.folder_id)
            .ok_or_else(|| AppError::not_found("Typebot not found"))?;
        if state.form_name_taken(scope, name, Some(id)) {
            return Err(AppError::conflict("A typebot with this name already exists"));
        }

        let stored = state
            .forms
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Typebot not found"))?;
        stored.form.name = name.to_string();
        stored.form.updated_at = Utc::now();
        Ok(stored.form.clone())
    }

    async fn replace_fields(&self, id: FormId, fields: &[Field]) -> AppResult<Form> {
        let mut state = self.state.write().await;
        let stored = state
            .forms
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Typebot not found"))?;
        stored.form.fields = fields.to_vec();
        stored.form.updated_at = Utc::now();
        Ok(stored.form.clone())
    }

    async fn move_to(&self, id: FormId, folder_id: Option<FolderId>) -> AppResult<Form> {
        let mut state = self.state.write().await;
        let (current, name) = state
            .forms
            .get(&id)
            .map(|f| (f.form.folder_id, f.form.name.clone()))
            .ok_or_else(|| AppError::not_found("Typebot not found"))?;

        if current == folder_id {
            return state
                .forms
                .get(&id)
                .map(|f| f.form.clone())
                .ok_or_else(|| AppError::not_found("Typebot not found"));
        }
        if let Some(target) = folder_id {
            if !state.folders.contains_key(&target) {
                return Err(AppError::not_found("Folder not found"));
            }
        }
        if state.form_name_taken(folder_id, &name, Some(id)) {
            return Err(AppError::conflict("A typebot with this name already exists"));
        }

        let filed_seq = match folder_id {
            Some(_) => Some(state.next_seq()),
            None => None,
        };
        let stored = state
            .forms
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Typebot not found"))?;
        stored.form.folder_id = folder_id;
        stored.form.updated_at = Utc::now();
        stored.filed_seq = filed_seq;
        Ok(stored.form.clone())
    }

    async fn delete(&self, id: FormId) -> AppResult<bool> {
        Ok(self.state.write().await.forms.remove(&id).is_some())
    }
}

#[async_trait]
impl ResponseStore for MemoryStore {
    async fn create(
        &self,
        form_id: FormId,
        responses: &BTreeMap<String, String>,
    ) -> AppResult<FormResponse> {
        let response = FormResponse {
            id: ResponseId::new(),
            form_id,
            responses: responses.clone(),
            created_at: Utc::now(),
        };
        self.state.write().await.responses.push(response.clone());
        Ok(response)
    }

    async fn count_for_form(&self, form_id: FormId) -> AppResult<u64> {
        let state = self.state.read().await;
        Ok(state.responses.iter().filter(|r| r.form_id == form_id).count() as u64)
    }

    async fn recent_for_form(&self, form_id: FormId, limit: u32) -> AppResult<Vec<FormResponse>> {
        let state = self.state.read().await;
        Ok(state
            .responses
            .iter()
            .rev()
            .filter(|r| r.form_id == form_id)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}
