//! Project document operations
//!
//! Every operation addresses documents by the `id` column, not SQLite's
//! rowid. Mutations touch exactly one document and refresh `$.updated_at`
//! in the same statement; callers learn whether the target existed from the
//! returned match flag.

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use crate::models::{Project, ProjectUpdate, Track, TrackUpdate};

/// Cap on find-all results
const MAX_PROJECTS: i64 = 1000;

/// Insert a newly constructed project
pub async fn insert_project(pool: &SqlitePool, project: &Project) -> Result<()> {
    let doc = serde_json::to_string(project)?;

    sqlx::query("INSERT INTO projects (id, doc) VALUES (?, ?)")
        .bind(project.id.to_string())
        .bind(doc)
        .execute(pool)
        .await
        .context("Failed to insert project")?;

    Ok(())
}

/// Load all projects in insertion order, capped at 1000
pub async fn list_projects(pool: &SqlitePool) -> Result<Vec<Project>> {
    let rows = sqlx::query("SELECT doc FROM projects ORDER BY rowid LIMIT ?")
        .bind(MAX_PROJECTS)
        .fetch_all(pool)
        .await
        .context("Failed to list projects")?;

    rows.iter()
        .map(|row| {
            let doc: String = row.get("doc");
            serde_json::from_str(&doc).context("Failed to decode project document")
        })
        .collect()
}

/// Load one project by id
pub async fn get_project(pool: &SqlitePool, project_id: &str) -> Result<Option<Project>> {
    let row = sqlx::query("SELECT doc FROM projects WHERE id = ?")
        .bind(project_id)
        .fetch_optional(pool)
        .await
        .context("Failed to fetch project")?;

    match row {
        Some(row) => {
            let doc: String = row.get("doc");
            let project = serde_json::from_str(&doc).context("Failed to decode project document")?;
            Ok(Some(project))
        }
        None => Ok(None),
    }
}

/// Apply provided fields to a project and refresh `updated_at`
///
/// Returns false when no document matched the id.
pub async fn update_project_fields(
    pool: &SqlitePool,
    project_id: &str,
    update: &ProjectUpdate,
) -> Result<bool> {
    let now = serde_json::to_string(&Utc::now())?;

    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE projects SET doc = json_set(doc");

    if let Some(name) = &update.name {
        qb.push(", '$.name', json(");
        qb.push_bind(serde_json::to_string(name)?);
        qb.push(")");
    }
    if let Some(tempo) = update.tempo {
        qb.push(", '$.tempo', ");
        qb.push_bind(tempo);
    }
    qb.push(", '$.updated_at', json(");
    qb.push_bind(now);
    qb.push(")) WHERE id = ");
    qb.push_bind(project_id);

    let result = qb
        .build()
        .execute(pool)
        .await
        .context("Failed to update project")?;

    Ok(result.rows_affected() > 0)
}

/// Append a track to a project's track list and refresh `updated_at`
///
/// Returns false when no document matched the project id.
pub async fn push_track(pool: &SqlitePool, project_id: &str, track: &Track) -> Result<bool> {
    let doc = serde_json::to_string(track)?;
    let now = serde_json::to_string(&Utc::now())?;

    let result = sqlx::query(
        r#"
        UPDATE projects
        SET doc = json_set(doc, '$.tracks[#]', json(?), '$.updated_at', json(?))
        WHERE id = ?
        "#,
    )
    .bind(doc)
    .bind(now)
    .bind(project_id)
    .execute(pool)
    .await
    .context("Failed to append track")?;

    Ok(result.rows_affected() > 0)
}

/// Apply provided fields to one embedded track and refresh `updated_at`
///
/// The element is located by its `id` inside `$.tracks`; the statement only
/// matches when both the project and the track exist, so a single affected-row
/// check covers both levels of nesting. Returns false when nothing matched.
pub async fn update_track_fields(
    pool: &SqlitePool,
    project_id: &str,
    track_id: &str,
    update: &TrackUpdate,
) -> Result<bool> {
    let mut fields: Vec<(&str, String)> = Vec::new();
    if let Some(name) = &update.name {
        fields.push(("name", serde_json::to_string(name)?));
    }
    if let Some(volume) = update.volume {
        fields.push(("volume", serde_json::to_string(&volume)?));
    }
    if let Some(pan) = update.pan {
        fields.push(("pan", serde_json::to_string(&pan)?));
    }
    if let Some(muted) = update.muted {
        fields.push(("muted", serde_json::to_string(&muted)?));
    }
    if let Some(solo) = update.solo {
        fields.push(("solo", serde_json::to_string(&solo)?));
    }
    if let Some(effects) = &update.effects {
        fields.push(("effects", serde_json::to_string(effects)?));
    }

    let now = serde_json::to_string(&Utc::now())?;

    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE projects SET doc = json_set(doc");

    for (field, value) in &fields {
        // fullkey resolves to the element's path, e.g. '$.tracks[2]'
        qb.push(", (SELECT fullkey FROM json_each(doc, '$.tracks') WHERE json_extract(value, '$.id') = ");
        qb.push_bind(track_id);
        qb.push(") || '.");
        qb.push(*field);
        qb.push("', json(");
        qb.push_bind(value.as_str());
        qb.push(")");
    }

    qb.push(", '$.updated_at', json(");
    qb.push_bind(now);
    qb.push(")) WHERE id = ");
    qb.push_bind(project_id);
    qb.push(" AND EXISTS (SELECT 1 FROM json_each(doc, '$.tracks') WHERE json_extract(value, '$.id') = ");
    qb.push_bind(track_id);
    qb.push(")");

    let result = qb
        .build()
        .execute(pool)
        .await
        .context("Failed to update track")?;

    Ok(result.rows_affected() > 0)
}

/// Remove one embedded track by id and refresh `updated_at`
///
/// Returns false when the project id or track id matched nothing.
pub async fn pull_track(pool: &SqlitePool, project_id: &str, track_id: &str) -> Result<bool> {
    let now = serde_json::to_string(&Utc::now())?;

    let result = sqlx::query(
        r#"
        UPDATE projects
        SET doc = json_set(doc,
            '$.tracks', (SELECT json_group_array(json(value))
                         FROM json_each(doc, '$.tracks')
                         WHERE json_extract(value, '$.id') <> ?),
            '$.updated_at', json(?))
        WHERE id = ?
          AND EXISTS (SELECT 1 FROM json_each(doc, '$.tracks')
                      WHERE json_extract(value, '$.id') = ?)
        "#,
    )
    .bind(track_id)
    .bind(now)
    .bind(project_id)
    .bind(track_id)
    .execute(pool)
    .await
    .context("Failed to remove track")?;

    Ok(result.rows_affected() > 0)
}

/// Delete a project document
///
/// Returns false when no document matched the id.
pub async fn delete_project(pool: &SqlitePool, project_id: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM projects WHERE id = ?")
        .bind(project_id)
        .execute(pool)
        .await
        .context("Failed to delete project")?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProjectCreate;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await
            .expect("Failed to create in-memory database");
        crate::db::init_schema(&pool).await.expect("init schema");
        pool
    }

    #[tokio::test]
    async fn test_insert_and_get_project() {
        let pool = setup_pool().await;
        let project = Project::new("Demo".to_string(), Some(90));

        insert_project(&pool, &project).await.unwrap();

        let loaded = get_project(&pool, &project.id.to_string())
            .await
            .unwrap()
            .expect("project should exist");
        assert_eq!(loaded.id, project.id);
        assert_eq!(loaded.name, "Demo");
        assert_eq!(loaded.tempo, 90);
        assert!(loaded.tracks.is_empty());
    }

    #[tokio::test]
    async fn test_get_project_unknown_id() {
        let pool = setup_pool().await;
        let loaded = get_project(&pool, "no-such-id").await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_list_projects_insertion_order() {
        let pool = setup_pool().await;
        let first = Project::new("first".to_string(), None);
        let second = Project::new("second".to_string(), None);
        insert_project(&pool, &first).await.unwrap();
        insert_project(&pool, &second).await.unwrap();

        let all = list_projects(&pool).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "first");
        assert_eq!(all[1].name, "second");
    }

    #[tokio::test]
    async fn test_update_project_fields_partial() {
        let pool = setup_pool().await;
        let project = Project::new("old name".to_string(), Some(100));
        insert_project(&pool, &project).await.unwrap();

        let update = ProjectUpdate {
            name: Some("new name".to_string()),
            tempo: None,
        };
        let matched = update_project_fields(&pool, &project.id.to_string(), &update)
            .await
            .unwrap();
        assert!(matched);

        let loaded = get_project(&pool, &project.id.to_string())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.name, "new name");
        assert_eq!(loaded.tempo, 100);
        assert!(loaded.updated_at > project.updated_at);
    }

    #[tokio::test]
    async fn test_update_project_unknown_id() {
        let pool = setup_pool().await;
        let update = ProjectUpdate::default();
        let matched = update_project_fields(&pool, "no-such-id", &update)
            .await
            .unwrap();
        assert!(!matched);
    }

    #[tokio::test]
    async fn test_push_track_appends() {
        let pool = setup_pool().await;
        let project = Project::new("Demo".to_string(), None);
        insert_project(&pool, &project).await.unwrap();

        let first = Track::new("one".to_string(), "AAAA".to_string(), 1.0);
        let second = Track::new("two".to_string(), "BBBB".to_string(), 2.0);
        assert!(push_track(&pool, &project.id.to_string(), &first).await.unwrap());
        assert!(push_track(&pool, &project.id.to_string(), &second).await.unwrap());

        let loaded = get_project(&pool, &project.id.to_string())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.tracks.len(), 2);
        assert_eq!(loaded.tracks[0].id, first.id);
        assert_eq!(loaded.tracks[1].id, second.id);
    }

    #[tokio::test]
    async fn test_update_track_fields_leaves_others_untouched() {
        let pool = setup_pool().await;
        let project = Project::new("Demo".to_string(), None);
        insert_project(&pool, &project).await.unwrap();

        let track = Track::new("Lead Vocal".to_string(), "AAAA".to_string(), 180.5);
        push_track(&pool, &project.id.to_string(), &track).await.unwrap();

        let update = TrackUpdate {
            volume: Some(0.8),
            ..TrackUpdate::default()
        };
        let matched = update_track_fields(
            &pool,
            &project.id.to_string(),
            &track.id.to_string(),
            &update,
        )
        .await
        .unwrap();
        assert!(matched);

        let loaded = get_project(&pool, &project.id.to_string())
            .await
            .unwrap()
            .unwrap();
        let loaded_track = &loaded.tracks[0];
        assert_eq!(loaded_track.volume, 0.8);
        assert_eq!(loaded_track.name, "Lead Vocal");
        assert_eq!(loaded_track.pan, 0.0);
        assert!(!loaded_track.muted);
        assert!(!loaded_track.solo);
        assert_eq!(loaded_track.audio_data, "AAAA");
    }

    #[tokio::test]
    async fn test_update_track_booleans_round_trip() {
        let pool = setup_pool().await;
        let project = Project::new("Demo".to_string(), None);
        insert_project(&pool, &project).await.unwrap();

        let track = Track::new("drums".to_string(), "CCCC".to_string(), 10.0);
        push_track(&pool, &project.id.to_string(), &track).await.unwrap();

        let update = TrackUpdate {
            muted: Some(true),
            solo: Some(false),
            ..TrackUpdate::default()
        };
        update_track_fields(
            &pool,
            &project.id.to_string(),
            &track.id.to_string(),
            &update,
        )
        .await
        .unwrap();

        let loaded = get_project(&pool, &project.id.to_string())
            .await
            .unwrap()
            .unwrap();
        assert!(loaded.tracks[0].muted);
        assert!(!loaded.tracks[0].solo);
    }

    #[tokio::test]
    async fn test_update_track_unknown_track_id() {
        let pool = setup_pool().await;
        let project = Project::new("Demo".to_string(), None);
        insert_project(&pool, &project).await.unwrap();

        let update = TrackUpdate {
            volume: Some(0.5),
            ..TrackUpdate::default()
        };
        let matched = update_track_fields(
            &pool,
            &project.id.to_string(),
            "no-such-track",
            &update,
        )
        .await
        .unwrap();
        assert!(!matched);
    }

    #[tokio::test]
    async fn test_pull_track_removes_only_target() {
        let pool = setup_pool().await;
        let project = Project::new("Demo".to_string(), None);
        insert_project(&pool, &project).await.unwrap();

        let keep = Track::new("keep".to_string(), "AAAA".to_string(), 1.0);
        let removed = Track::new("drop".to_string(), "BBBB".to_string(), 2.0);
        push_track(&pool, &project.id.to_string(), &keep).await.unwrap();
        push_track(&pool, &project.id.to_string(), &removed).await.unwrap();

        let matched = pull_track(&pool, &project.id.to_string(), &removed.id.to_string())
            .await
            .unwrap();
        assert!(matched);

        let loaded = get_project(&pool, &project.id.to_string())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.tracks.len(), 1);
        assert_eq!(loaded.tracks[0].id, keep.id);

        // Second pull of the same id no longer matches
        let matched = pull_track(&pool, &project.id.to_string(), &removed.id.to_string())
            .await
            .unwrap();
        assert!(!matched);
    }

    #[tokio::test]
    async fn test_pull_last_track_leaves_empty_list() {
        let pool = setup_pool().await;
        let project = Project::new("Demo".to_string(), None);
        insert_project(&pool, &project).await.unwrap();

        let track = Track::new("only".to_string(), "AAAA".to_string(), 1.0);
        push_track(&pool, &project.id.to_string(), &track).await.unwrap();
        pull_track(&pool, &project.id.to_string(), &track.id.to_string())
            .await
            .unwrap();

        let loaded = get_project(&pool, &project.id.to_string())
            .await
            .unwrap()
            .unwrap();
        assert!(loaded.tracks.is_empty());
    }

    #[tokio::test]
    async fn test_delete_project() {
        let pool = setup_pool().await;
        let project = Project::new("Demo".to_string(), None);
        insert_project(&pool, &project).await.unwrap();

        assert!(delete_project(&pool, &project.id.to_string()).await.unwrap());
        assert!(get_project(&pool, &project.id.to_string())
            .await
            .unwrap()
            .is_none());
        assert!(!delete_project(&pool, &project.id.to_string()).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_request_defaults() {
        // ProjectCreate with omitted tempo feeds the 120 default
        let body: ProjectCreate = serde_json::from_str(r#"{"name": "x"}"#).unwrap();
        let project = Project::new(body.name, body.tempo);
        assert_eq!(project.tempo, 120);
    }
}
