//! Project CRUD endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::api::MessageResponse;
use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::models::{Project, ProjectCreate, ProjectUpdate};
use crate::AppState;

/// POST /projects - Create a new DAW project
pub async fn create_project(
    State(state): State<AppState>,
    Json(req): Json<ProjectCreate>,
) -> ApiResult<Json<Project>> {
    let project = Project::new(req.name, req.tempo);

    db::projects::insert_project(&state.db, &project).await?;

    info!("Created project {} ({})", project.id, project.name);
    Ok(Json(project))
}

/// GET /projects - List all projects
pub async fn list_projects(State(state): State<AppState>) -> ApiResult<Json<Vec<Project>>> {
    let projects = db::projects::list_projects(&state.db).await?;
    Ok(Json(projects))
}

/// GET /projects/:project_id - Get a specific project by id
pub async fn get_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> ApiResult<Json<Project>> {
    let project = db::projects::get_project(&state.db, &project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(Json(project))
}

/// PUT /projects/:project_id - Update project details
///
/// Partial update: only fields present in the body are written; `updated_at`
/// is refreshed either way. The fresh document is re-read and returned.
pub async fn update_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(update): Json<ProjectUpdate>,
) -> ApiResult<Json<Project>> {
    let matched = db::projects::update_project_fields(&state.db, &project_id, &update).await?;
    if !matched {
        return Err(ApiError::NotFound("Project not found".to_string()));
    }

    let project = db::projects::get_project(&state.db, &project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    info!("Updated project {}", project_id);
    Ok(Json(project))
}

/// DELETE /projects/:project_id - Delete a project and its tracks
pub async fn delete_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let matched = db::projects::delete_project(&state.db, &project_id).await?;
    if !matched {
        return Err(ApiError::NotFound("Project not found".to_string()));
    }

    info!("Deleted project {}", project_id);
    Ok(Json(MessageResponse {
        message: "Project deleted successfully".to_string(),
    }))
}
