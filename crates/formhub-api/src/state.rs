//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use formhub_auth::{CredentialStore, SessionIssuer};
use formhub_core::config::AppConfig;
use formhub_database::StoreManager;
use formhub_service::{AuthService, FolderService, FormService, ResponseService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Store handles for the configured provider
    pub stores: StoreManager,

    // ── Services ─────────────────────────────────────────────
    /// Registration, login, and session tokens
    pub auth_service: Arc<AuthService>,
    /// Folder registry
    pub folder_service: Arc<FolderService>,
    /// Typebot registry
    pub form_service: Arc<FormService>,
    /// Response collector
    pub response_service: Arc<ResponseService>,
}

impl AppState {
    /// Wires every service on top of the given stores.
    pub fn new(config: AppConfig, stores: StoreManager) -> Self {
        let sessions = Arc::new(SessionIssuer::new(&config.auth));
        let credentials = Arc::new(CredentialStore::new(stores.users.clone(), &config.auth));

        let auth_service = Arc::new(AuthService::new(credentials, sessions));
        let folder_service = Arc::new(FolderService::new(
            stores.folders.clone(),
            stores.forms.clone(),
        ));
        let form_service = Arc::new(FormService::new(
            stores.forms.clone(),
            stores.folders.clone(),
        ));
        let response_service = Arc::new(ResponseService::new(stores.responses.clone()));

        Self {
            config: Arc::new(config),
            stores,
            auth_service,
            folder_service,
            form_service,
            response_service,
        }
    }
}
