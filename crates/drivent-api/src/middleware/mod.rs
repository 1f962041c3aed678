//! # Middleware Stack
//!
//! Tower middleware for the API layer:
//! - [`metrics`]: Prometheus request metrics and hotel access counters.
//!
//! Request tracing uses `tower_http::trace::TraceLayer` directly in
//! [`crate::app`]; authentication lives in [`crate::auth`].

pub mod metrics;
