//! # formhub-service
//!
//! Business logic for FormHub. Each service validates input, runs the
//! cheap pre-checks that give friendly error messages, and then hands the
//! authoritative write to a store method, which enforces uniqueness and
//! folder membership atomically.
//!
//! Services follow constructor injection: every dependency is passed in at
//! construction time as an `Arc`.

pub mod auth;
pub mod context;
pub mod folder;
pub mod form;
pub mod response;

mod naming;

pub use auth::{AuthService, AuthSession};
pub use context::RequestContext;
pub use folder::FolderService;
pub use form::FormService;
pub use response::ResponseService;
