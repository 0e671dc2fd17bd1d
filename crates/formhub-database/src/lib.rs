//! # formhub-database
//!
//! Persistence for FormHub. The [`store`] traits describe every operation
//! the services need, each one atomic on its own. Two implementations are
//! provided: PostgreSQL repositories (sqlx) and an in-memory store, picked
//! at startup by [`StoreManager`] from `database.provider`.

pub mod manager;
pub mod memory;
mod postgres;
pub mod repositories;
pub mod store;

pub use manager::StoreManager;
pub use memory::MemoryStore;
pub use store::{FolderStore, FormStore, ResponseStore, UserStore};
