//! Audio processing endpoint (placeholder)

use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct ProcessAudioRequest {
    pub audio_data: String,
    pub effects: Vec<JsonValue>,
}

#[derive(Debug, Serialize)]
pub struct ProcessAudioResponse {
    pub processed_audio: String,
    pub effects_applied: Vec<JsonValue>,
}

/// POST /audio/process - Apply effects to audio data
///
/// Placeholder: no DSP is performed. The input payload is echoed back
/// unchanged so clients can wire up their effect chains ahead of a real
/// processing backend.
pub async fn process_audio(
    Json(req): Json<ProcessAudioRequest>,
) -> Json<ProcessAudioResponse> {
    info!(
        "Process audio request: {} effect(s), {} encoded bytes (no-op)",
        req.effects.len(),
        req.audio_data.len()
    );

    Json(ProcessAudioResponse {
        processed_audio: req.audio_data,
        effects_applied: req.effects,
    })
}
