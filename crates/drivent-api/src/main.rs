//! # drivent-api: Binary Entry Point
//!
//! Starts the Axum HTTP server for the hotels API.
//! Binds to `PORT` (default 4000).

use drivent_api::state::{AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    tracing::info!(?config, "configuration loaded");
    if config.auth_secret.is_none() {
        tracing::warn!("AUTH_SECRET not set: bearer tokens carry only the user id");
    }

    // Absent DATABASE_URL means in-memory only.
    let db_pool = drivent_api::db::init_pool(config.database_url.as_deref())
        .await
        .map_err(|e| {
            tracing::error!("Database initialization failed: {e}");
            e
        })?;

    let port = config.port;
    let state = AppState::with_config(config, db_pool);
    let app = drivent_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Drivent API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
