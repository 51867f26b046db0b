//! Root and health endpoints

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RootResponse {
    message: String,
    version: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    module: String,
    version: String,
}

/// GET /api/ - API readiness banner
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "DAW API Ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /health - Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        module: "daw-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
