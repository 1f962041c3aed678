//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! ## Architecture
//!
//! AppState holds the records the hotels service reads:
//! - **Enrollments** and **Tickets**: consumed by the eligibility check
//! - **Hotels** and **Rooms**: served once the check passes
//!
//! When a Postgres pool is configured every lookup goes to the database and
//! the in-memory stores stay empty. Without a pool the stores are the source
//! of truth (development and tests). See [`crate::repository`].

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use drivent_core::{Enrollment, EnrollmentId, Hotel, HotelId, Room, RoomId, Ticket, TicketId};
use parking_lot::RwLock;
use sqlx::PgPool;

use crate::middleware::metrics::ApiMetrics;

// -- Generic In-Memory Store --------------------------------------------------

/// Thread-safe, cloneable in-memory key-value store.
///
/// The lock is `parking_lot`, not `tokio::sync`: it is never held across an
/// `.await` point.
#[derive(Debug)]
pub struct Store<K, T> {
    data: Arc<RwLock<HashMap<K, T>>>,
}

impl<K, T> Clone for Store<K, T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<K: Eq + Hash + Copy + Ord, T: Clone> Store<K, T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert a record, returning the previous value if the key existed.
    pub fn insert(&self, id: K, value: T) -> Option<T> {
        self.data.write().insert(id, value)
    }

    /// Retrieve a record by key.
    pub fn get(&self, id: &K) -> Option<T> {
        self.data.read().get(id).cloned()
    }

    /// List all records ordered by key.
    pub fn list(&self) -> Vec<T> {
        let guard = self.data.read();
        let mut keys: Vec<K> = guard.keys().copied().collect();
        keys.sort();
        keys.iter().filter_map(|k| guard.get(k).cloned()).collect()
    }

    /// Return the first record (in key order) matching `predicate`.
    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        self.data
            .read()
            .iter()
            .filter(|(_, v)| predicate(v))
            .min_by_key(|(k, _)| **k)
            .map(|(_, v)| v.clone())
    }

    /// Return every record (in key order) matching `predicate`.
    pub fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.list().into_iter().filter(|v| predicate(v)).collect()
    }
}

impl<K: Eq + Hash + Copy + Ord, T: Clone> Default for Store<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

// -- Configuration ------------------------------------------------------------

/// Runtime configuration, read once from the environment at startup.
#[derive(Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Shared bearer secret. `None` runs in development mode, where the
    /// bearer token is only the user id.
    pub auth_secret: Option<String>,
    /// Postgres connection string. `None` runs in-memory only.
    pub database_url: Option<String>,
    /// Whether to record Prometheus metrics and serve `/metrics`.
    pub metrics_enabled: bool,
}

impl AppConfig {
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 4000;

    /// Build configuration from `PORT`, `AUTH_SECRET`, `DATABASE_URL` and
    /// `DRIVENT_METRICS_ENABLED`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(Self::DEFAULT_PORT);
        let auth_secret = lookup("AUTH_SECRET").filter(|s| !s.is_empty());
        let database_url = lookup("DATABASE_URL").filter(|s| !s.is_empty());
        let metrics_enabled = lookup("DRIVENT_METRICS_ENABLED")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);
        Self {
            port,
            auth_secret,
            database_url,
            metrics_enabled,
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("auth_secret", &self.auth_secret.as_ref().map(|_| "[REDACTED]"))
            .field("database_url", &self.database_url.as_ref().map(|_| "[REDACTED]"))
            .field("metrics_enabled", &self.metrics_enabled)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: Self::DEFAULT_PORT,
            auth_secret: None,
            database_url: None,
            metrics_enabled: true,
        }
    }
}

// -- Application State --------------------------------------------------------

/// Shared application state. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    pub enrollments: Store<EnrollmentId, Enrollment>,
    /// Tickets are stored joined with their ticket type.
    pub tickets: Store<TicketId, Ticket>,
    pub hotels: Store<HotelId, Hotel>,
    pub rooms: Store<RoomId, Room>,

    /// PostgreSQL pool. When `Some`, all lookups go to the database.
    pub db_pool: Option<PgPool>,

    pub metrics: ApiMetrics,

    pub config: AppConfig,
}

impl AppState {
    /// Create in-memory state with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default(), None)
    }

    /// Create state with the given configuration and optional database pool.
    pub fn with_config(config: AppConfig, db_pool: Option<PgPool>) -> Self {
        Self {
            enrollments: Store::new(),
            tickets: Store::new(),
            hotels: Store::new(),
            rooms: Store::new(),
            db_pool,
            metrics: ApiMetrics::new(),
            config,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
