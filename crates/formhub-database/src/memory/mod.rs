//! In-process store backed by a single lock.
//!
//! Used by the `memory` provider for local development and by tests that
//! should not need PostgreSQL.

mod store;

pub use store::MemoryStore;
