//! Persistence adapter
//!
//! Projects are stored as whole JSON documents (tracks embedded) in a single
//! SQLite table, addressed by the application-generated project id. All
//! mutations are single statements; existence is judged from the affected row
//! count after the write, never by a read-before-write.

use anyhow::{Context, Result};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

pub mod projects;

/// Connect to the database given a SQLite connection string
///
/// `sqlite://daw.db?mode=rwc` creates the file on first run.
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .connect(database_url)
        .await
        .with_context(|| format!("Failed to connect to database at {}", database_url))?;

    Ok(pool)
}

/// Create the projects table if it does not exist
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS projects (
            id TEXT PRIMARY KEY,
            doc TEXT NOT NULL CHECK (json_valid(doc))
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create projects table")?;

    Ok(())
}
