//! Entity model for DAW projects and tracks
//!
//! Projects own an ordered list of embedded tracks. Identifiers are random
//! UUIDs generated at construction; timestamps default to the current instant.
//! No semantic range validation is performed on tempo/volume/pan — values are
//! stored and returned as supplied.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Default project tempo in beats per minute
pub const DEFAULT_TEMPO: i64 = 120;

/// A single audio clip embedded in a project
///
/// `audio_data` is an opaque text-safe encoding (base64 from the web client);
/// the server never decodes or transcodes it. `effects` is an opaque sequence
/// of records whose internal structure the server does not interpret.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: Uuid,
    pub name: String,
    pub audio_data: String,
    /// Clip length in seconds
    pub duration: f64,
    #[serde(default = "default_volume")]
    pub volume: f64,
    /// Stereo position, -1 (left) to 1 (right); not enforced
    #[serde(default)]
    pub pan: f64,
    #[serde(default)]
    pub muted: bool,
    #[serde(default)]
    pub solo: bool,
    #[serde(default)]
    pub effects: Vec<JsonValue>,
    pub created_at: DateTime<Utc>,
}

fn default_volume() -> f64 {
    1.0
}

impl Track {
    /// Create a new track with default mixer settings
    pub fn new(name: String, audio_data: String, duration: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            audio_data,
            duration,
            volume: 1.0,
            pan: 0.0,
            muted: false,
            solo: false,
            effects: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

/// A DAW session: named, with a tempo and an ordered track list
///
/// `updated_at` is refreshed on every mutation of the project or any of its
/// tracks. Track ids are unique within a project (not globally).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub tempo: i64,
    #[serde(default)]
    pub tracks: Vec<Track>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Create a new empty project; tempo defaults to 120 BPM when omitted
    pub fn new(name: String, tempo: Option<i64>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            tempo: tempo.unwrap_or(DEFAULT_TEMPO),
            tracks: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

// ============================================================================
// Request Records
// ============================================================================

/// POST /projects request body
#[derive(Debug, Deserialize)]
pub struct ProjectCreate {
    pub name: String,
    #[serde(default)]
    pub tempo: Option<i64>,
}

/// PUT /projects/{id} request body
///
/// Partial update: only fields present in the body are written. No field is
/// nullable in the model, so `null` and absent both mean "leave untouched".
#[derive(Debug, Default, Deserialize)]
pub struct ProjectUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tempo: Option<i64>,
}

/// POST /projects/{id}/tracks request body
#[derive(Debug, Deserialize)]
pub struct TrackCreate {
    pub name: String,
    pub audio_data: String,
    pub duration: f64,
}

/// PUT /projects/{id}/tracks/{id} request body
///
/// Partial update over the embedded track. `Some` applies exactly the given
/// value, even when it equals the field's default (e.g. volume 1.0).
#[derive(Debug, Default, Deserialize)]
pub struct TrackUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub volume: Option<f64>,
    #[serde(default)]
    pub pan: Option<f64>,
    #[serde(default)]
    pub muted: Option<bool>,
    #[serde(default)]
    pub solo: Option<bool>,
    #[serde(default)]
    pub effects: Option<Vec<JsonValue>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_defaults() {
        let project = Project::new("Demo".to_string(), None);
        assert_eq!(project.tempo, 120);
        assert!(project.tracks.is_empty());
        assert_eq!(project.created_at, project.updated_at);
    }

    #[test]
    fn test_project_explicit_tempo() {
        let project = Project::new("Demo".to_string(), Some(90));
        assert_eq!(project.tempo, 90);
    }

    #[test]
    fn test_track_defaults() {
        let track = Track::new("Lead Vocal".to_string(), "AAAA".to_string(), 180.5);
        assert_eq!(track.volume, 1.0);
        assert_eq!(track.pan, 0.0);
        assert!(!track.muted);
        assert!(!track.solo);
        assert!(track.effects.is_empty());
        assert_eq!(track.duration, 180.5);
    }

    #[test]
    fn test_track_ids_unique() {
        let a = Track::new("a".to_string(), String::new(), 0.0);
        let b = Track::new("b".to_string(), String::new(), 0.0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_track_update_null_means_absent() {
        let update: TrackUpdate =
            serde_json::from_str(r#"{"volume": 0.8, "name": null}"#).unwrap();
        assert_eq!(update.volume, Some(0.8));
        assert!(update.name.is_none());
        assert!(update.effects.is_none());
    }

    #[test]
    fn test_track_missing_mixer_fields_deserialize_to_defaults() {
        let track: Track = serde_json::from_str(
            r#"{
                "id": "550e8400-e29b-41d4-a716-446655440000",
                "name": "bare",
                "audio_data": "",
                "duration": 1.0,
                "created_at": "2025-01-01T00:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(track.volume, 1.0);
        assert_eq!(track.pan, 0.0);
        assert!(!track.muted);
    }
}
