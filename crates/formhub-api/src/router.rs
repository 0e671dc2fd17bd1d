//! Route definitions for the FormHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post, put},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the API router with request logging.
///
/// CORS and tracing layers are added by [`build_app`](crate::app::build_app).
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(folder_routes())
        .merge(form_routes())
        .merge(public_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Auth endpoints: register, login, logout, check, check-email
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/check", get(handlers::auth::check))
        .route("/auth/check-email", post(handlers::auth::check_email))
}

/// User self-service endpoints
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/profile", put(handlers::user::update_profile))
        .route("/users/password", put(handlers::user::change_password))
}

/// Folder CRUD and folder members
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/folders",
            get(handlers::folder::list_folders).post(handlers::folder::create_folder),
        )
        .route(
            "/folders/{id}",
            get(handlers::folder::get_folder)
                .put(handlers::folder::rename_folder)
                .delete(handlers::folder::delete_folder),
        )
        .route(
            "/folders/{id}/typebots",
            get(handlers::folder::list_folder_forms).post(handlers::folder::create_folder_form),
        )
}

/// Typebot CRUD, fields, moves, stats
fn form_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/typebots",
            get(handlers::form::list_unfiled).post(handlers::form::create_unfiled),
        )
        .route(
            "/typebots/{id}",
            get(handlers::form::get_form)
                .put(handlers::form::rename_form)
                .delete(handlers::form::delete_form),
        )
        .route("/typebots/{id}/fields", put(handlers::form::set_fields))
        .route("/typebots/{id}/move", put(handlers::form::move_form))
        .route("/typebots/{id}/stats", get(handlers::response::stats))
}

/// Anonymous respondent endpoints
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/typebots/{id}/public", get(handlers::form::get_public))
        .route("/typebots/{id}/responses", post(handlers::response::submit))
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
