//! # Database Persistence Layer
//!
//! Postgres access via SQLx.
//!
//! The database layer is **optional**. When `DATABASE_URL` is set, every
//! lookup reads from PostgreSQL. When absent, the API serves from the
//! in-memory stores in [`crate::state::AppState`] (development and tests).
//!
//! All queries are runtime-checked `query_as` calls mapped onto private row
//! structs, then converted into `drivent-core` records.

pub mod enrollments;
pub mod hotels;
pub mod tickets;

use drivent_core::ValidationError;
use sqlx::postgres::{PgPool, PgPoolOptions};

/// Initialize the database connection pool and run migrations.
///
/// Returns `None` if no URL is configured (in-memory-only mode).
/// Returns `Err` if the URL is set but the connection or migration fails.
pub async fn init_pool(database_url: Option<&str>) -> Result<Option<PgPool>, sqlx::Error> {
    let Some(url) = database_url else {
        tracing::warn!(
            "DATABASE_URL not set: running in-memory only mode. \
             Hotel and attendee data must be seeded in process."
        );
        return Ok(None);
    };

    let pool = PgPoolOptions::new()
        .max_connections(20)
        .min_connections(2)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect(url)
        .await?;

    tracing::info!("Connected to PostgreSQL");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(Some(pool))
}

/// Turn a key read from the database into an identifier newtype.
///
/// Serial keys are always positive, so a failure here means the row is
/// corrupt and is reported as a decode error.
pub(crate) fn decode_id<T>(
    raw: i32,
    build: impl FnOnce(i32) -> Result<T, ValidationError>,
) -> Result<T, sqlx::Error> {
    build(raw).map_err(|e| sqlx::Error::Decode(Box::new(e)))
}
