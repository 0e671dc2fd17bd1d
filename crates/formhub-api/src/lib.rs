//! # formhub-api
//!
//! HTTP API layer for FormHub built on Axum.
//!
//! Provides the REST endpoints, the bearer-token extractor, request
//! logging and CORS middleware, DTOs, and the mapping from
//! [`AppError`](formhub_core::error::AppError) to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
