//! HTTP request handlers
//!
//! One module per resource. Handlers receive the shared [`AppState`] via the
//! axum `State` extractor and return typed JSON responses; domain failures
//! surface through [`crate::error::ApiError`].
//!
//! [`AppState`]: crate::AppState

pub mod audio;
pub mod health;
pub mod projects;
pub mod tracks;

use serde::Serialize;

/// Confirmation body for delete endpoints
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
