//! daw-api - Main entry point
//!
//! HTTP/JSON backend for a browser DAW: persists projects with embedded audio
//! tracks and serves the CRUD API under `/api`.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use daw_api::{build_router, db, AppState};

/// Command-line arguments for daw-api
#[derive(Parser, Debug)]
#[command(name = "daw-api")]
#[command(about = "DAW project backend")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "8000", env = "DAW_PORT")]
    port: u16,

    /// SQLite connection string for the project store
    #[arg(
        long,
        default_value = "sqlite://daw.db?mode=rwc",
        env = "DAW_DATABASE_URL"
    )]
    database_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "daw_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    info!("Starting DAW API v{}", env!("CARGO_PKG_VERSION"));

    let pool = db::connect(&args.database_url).await?;
    db::init_schema(&pool).await?;
    info!("Connected to database: {}", args.database_url);

    let state = AppState::new(pool.clone());
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("daw-api listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // Release the connection pool on all exit paths
    pool.close().await;
    info!("Database connection closed");

    Ok(())
}

/// Resolve when the process receives ctrl-c
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("Failed to install ctrl-c handler: {}", e);
    }
    info!("Shutdown signal received");
}
