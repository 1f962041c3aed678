//! # drivent-api: HTTP Service for Event Hotel Listings
//!
//! Attendees with a paid, in-person ticket that includes lodging can browse
//! the event's hotels and their rooms. Every hotel request first runs the
//! eligibility check from [`drivent_core::EligibilityChecker`].
//!
//! ## API Surface
//!
//! | Route                   | Module               | Auth |
//! |-------------------------|----------------------|------|
//! | `GET /hotels`           | [`routes::hotels`]   | yes  |
//! | `GET /hotels/{hotelId}` | [`routes::hotels`]   | yes  |
//! | `GET /openapi.json`     | [`openapi`]          | yes  |
//! | `GET /health/liveness`  | this module          | no   |
//! | `GET /health/readiness` | this module          | no   |
//! | `GET /metrics`          | this module          | no   |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → AuthMiddleware → Handler
//! ```

pub mod auth;
pub mod db;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod state;

use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::auth::AuthConfig;
use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
///
/// Health probes and `/metrics` are mounted outside the auth middleware so
/// they remain accessible without credentials.
pub fn app(state: AppState) -> Router {
    let auth_config = AuthConfig {
        secret: state.config.auth_secret.clone(),
    };
    let metrics_enabled = state.config.metrics_enabled;

    // Authenticated API routes.
    let mut api = Router::new()
        .merge(routes::hotels::router())
        .merge(openapi::router())
        .layer(from_fn(auth::auth_middleware));
    if metrics_enabled {
        api = api
            .layer(from_fn(middleware::metrics::metrics_middleware))
            .layer(axum::Extension(state.metrics.clone()));
    }
    let api = api
        .layer(TraceLayer::new_for_http())
        .layer(axum::Extension(auth_config))
        .with_state(state.clone());

    // Unauthenticated probes.
    let mut public = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));
    if metrics_enabled {
        public = public.route("/metrics", get(prometheus_metrics));
    }

    Router::new().merge(public.with_state(state)).merge(api)
}

/// Liveness probe: 200 while the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: 503 when a configured database cannot be reached.
async fn readiness(State(state): State<AppState>) -> Response {
    if let Some(pool) = &state.db_pool {
        if let Err(e) = sqlx::query("SELECT 1").execute(pool).await {
            tracing::warn!(error = %e, "readiness check failed: database unreachable");
            return (StatusCode::SERVICE_UNAVAILABLE, "database unavailable").into_response();
        }
    }
    "ready".into_response()
}

async fn prometheus_metrics(State(state): State<AppState>) -> Response {
    match state.metrics.gather_and_encode() {
        Ok(body) => (
            [(
                axum::http::header::CONTENT_TYPE,
                "text/plain; version=0.0.4; charset=utf-8",
            )],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
