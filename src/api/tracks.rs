//! Track endpoints (nested under a parent project)

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::api::MessageResponse;
use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::models::{Track, TrackCreate, TrackUpdate};
use crate::AppState;

/// POST /projects/:project_id/tracks - Add a new audio track to a project
///
/// The track is constructed with default mixer settings and appended to the
/// end of the parent's track list in one write.
pub async fn add_track(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(req): Json<TrackCreate>,
) -> ApiResult<Json<Track>> {
    let track = Track::new(req.name, req.audio_data, req.duration);

    let matched = db::projects::push_track(&state.db, &project_id, &track).await?;
    if !matched {
        return Err(ApiError::NotFound("Project not found".to_string()));
    }

    info!(
        "Added track {} ({}) to project {}",
        track.id, track.name, project_id
    );
    Ok(Json(track))
}

/// PUT /projects/:project_id/tracks/:track_id - Update track properties
///
/// Partial update over volume, pan, mute, solo, name, effects. One write
/// round trip, then one read to return the fresh embedded track.
pub async fn update_track(
    State(state): State<AppState>,
    Path((project_id, track_id)): Path<(String, String)>,
    Json(update): Json<TrackUpdate>,
) -> ApiResult<Json<Track>> {
    let matched =
        db::projects::update_track_fields(&state.db, &project_id, &track_id, &update).await?;
    if !matched {
        return Err(ApiError::NotFound("Project or track not found".to_string()));
    }

    let project = db::projects::get_project(&state.db, &project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    let track = project
        .tracks
        .into_iter()
        .find(|t| t.id.to_string() == track_id)
        .ok_or_else(|| ApiError::NotFound("Track not found".to_string()))?;

    info!("Updated track {} in project {}", track_id, project_id);
    Ok(Json(track))
}

/// DELETE /projects/:project_id/tracks/:track_id - Delete a track from a project
pub async fn delete_track(
    State(state): State<AppState>,
    Path((project_id, track_id)): Path<(String, String)>,
) -> ApiResult<Json<MessageResponse>> {
    let matched = db::projects::pull_track(&state.db, &project_id, &track_id).await?;
    if !matched {
        return Err(ApiError::NotFound("Project or track not found".to_string()));
    }

    info!("Deleted track {} from project {}", track_id, project_id);
    Ok(Json(MessageResponse {
        message: "Track deleted successfully".to_string(),
    }))
}
