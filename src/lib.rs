//! daw-api library - persistence and HTTP surface for the DAW backend
//!
//! Stores DAW projects (with embedded tracks) as JSON documents and exposes
//! CRUD over an `/api`-prefixed HTTP surface. See `build_router` for the
//! route table.

use axum::routing::{get, post, put};
use axum::Router;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod error;
pub mod models;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
///
/// All API routes live under `/api`; `/health` sits outside the prefix.
/// CORS mirrors any origin and permits credentials - a development posture,
/// not a security boundary.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/", get(api::health::root))
        .route(
            "/projects",
            post(api::projects::create_project).get(api::projects::list_projects),
        )
        .route(
            "/projects/:project_id",
            get(api::projects::get_project)
                .put(api::projects::update_project)
                .delete(api::projects::delete_project),
        )
        .route("/projects/:project_id/tracks", post(api::tracks::add_track))
        .route(
            "/projects/:project_id/tracks/:track_id",
            put(api::tracks::update_track).delete(api::tracks::delete_track),
        )
        .route("/audio/process", post(api::audio::process_audio));

    Router::new()
        .route("/health", get(api::health::health))
        // `nest` matches `/api` but not `/api/`; register the trailing-slash
        // form explicitly so both reach the root handler.
        .route("/api/", get(api::health::root))
        .nest("/api", api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
}
