//! Store manager that dispatches to the configured persistence provider.

use std::fmt;
use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;

use formhub_core::config::DatabaseConfig;
use formhub_core::error::AppError;
use formhub_core::result::AppResult;

use crate::memory::MemoryStore;
use crate::postgres;
use crate::repositories::{FolderRepository, FormRepository, ResponseRepository, UserRepository};
use crate::store::{FolderStore, FormStore, ResponseStore, UserStore};

/// Handles to every store, backed by one provider.
///
/// The provider is selected at construction time from
/// `database.provider`.
#[derive(Clone)]
pub struct StoreManager {
    /// User persistence.
    pub users: Arc<dyn UserStore>,
    /// Folder persistence.
    pub folders: Arc<dyn FolderStore>,
    /// Form persistence.
    pub forms: Arc<dyn FormStore>,
    /// Response persistence.
    pub responses: Arc<dyn ResponseStore>,
    pool: Option<PgPool>,
}

impl StoreManager {
    /// Create the stores from configuration.
    ///
    /// The `postgres` provider connects and runs pending migrations before
    /// returning.
    pub async fn new(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider.as_str() {
            "postgres" => {
                info!("Initializing PostgreSQL store provider");
                let pool = postgres::open(config).await?;
                Ok(Self::postgres(pool))
            }
            "memory" => {
                info!("Initializing in-memory store provider");
                Ok(Self::memory())
            }
            other => Err(AppError::configuration(format!(
                "Unknown database provider: '{other}'. Supported: postgres, memory"
            ))),
        }
    }

    /// Stores backed by an existing, migrated PostgreSQL pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            folders: Arc::new(FolderRepository::new(pool.clone())),
            forms: Arc::new(FormRepository::new(pool.clone())),
            responses: Arc::new(ResponseRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Stores sharing one fresh in-memory state.
    pub fn memory() -> Self {
        Self::from_memory(MemoryStore::new())
    }

    /// Stores sharing the given in-memory state (for testing).
    pub fn from_memory(store: MemoryStore) -> Self {
        Self {
            users: Arc::new(store.clone()),
            folders: Arc::new(store.clone()),
            forms: Arc::new(store.clone()),
            responses: Arc::new(store),
            pool: None,
        }
    }

    /// Name of the active provider.
    pub fn provider(&self) -> &'static str {
        if self.pool.is_some() { "postgres" } else { "memory" }
    }

    /// Check that the backing store is reachable.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(pool) => postgres::ping(pool).await,
            None => Ok(true),
        }
    }

    /// Release pooled connections, if any.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
            info!("PostgreSQL pool closed");
        }
    }
}

impl fmt::Debug for StoreManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreManager")
            .field("provider", &self.provider())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formhub_core::error::ErrorKind;

    #[tokio::test]
    async fn test_memory_provider() {
        let manager = StoreManager::new(&DatabaseConfig::memory()).await.unwrap();
        assert_eq!(manager.provider(), "memory");
        assert!(manager.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_provider_rejected() {
        let config = DatabaseConfig {
            provider: "sqlite".to_string(),
            ..DatabaseConfig::memory()
        };
        let err = StoreManager::new(&config).await.unwrap_err();
        assert!(err.is(ErrorKind::Configuration));
    }

    #[tokio::test]
    async fn test_memory_stores_share_state() {
        let manager = StoreManager::memory();
        let folder = manager.folders.create("Shared").await.unwrap();
        let form = manager
            .forms
            .create(&formhub_entity::form::CreateForm {
                name: "NPS".to_string(),
                folder_id: Some(folder.id),
            })
            .await
            .unwrap();

        let folder = manager.folders.find_by_id(folder.id).await.unwrap().unwrap();
        assert!(folder.contains(form.id));
    }
}
