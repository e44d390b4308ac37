//! # Connection Provider
//!
//! Connection string validation and per-operation connection acquisition.
//!
//! ## Lifecycle
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                      Connection Provider                             │
//! │                                                                      │
//! │  Process startup                                                     │
//! │       │                                                              │
//! │       ▼                                                              │
//! │  ConnectionProvider::new(url) ← parse + validate ONCE                │
//! │       │                         (no I/O; pool connects lazily)       │
//! │       ▼                                                              │
//! │  ┌─────────────────────────────────────────┐                         │
//! │  │             SqlitePool                  │                         │
//! │  │   ┌─────┐ ┌─────┐ ┌─────┐ ┌─────┐       │                         │
//! │  │   │Conn1│ │Conn2│ │Conn3│ │Conn4│ ...   │                         │
//! │  │   └─────┘ └─────┘ └─────┘ └─────┘       │                         │
//! │  └─────────────────────────────────────────┘                         │
//! │       │                                                              │
//! │       ▼                                                              │
//! │  repository operation ──► acquire() ──► handle, returned on drop     │
//! │  (each call gets its own handle; calls never share one)              │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! SQLite WAL (Write-Ahead Logging) mode is enabled so readers and writers
//! do not block each other.

use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Sqlite, SqlitePool};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::ConfigError;

/// Pool sizing for file-backed databases. Connection scheduling beyond this
/// is the driver's concern.
const MAX_CONNECTIONS: u32 = 5;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

// =============================================================================
// Connection Provider
// =============================================================================

/// Produces independent store connections, one per repository operation.
///
/// Construction parses and validates the connection string exactly once;
/// a bad string is a [`ConfigError`] at startup, never a per-call failure.
/// No connection is opened until the first [`acquire`](Self::acquire).
#[derive(Debug, Clone)]
pub struct ConnectionProvider {
    pool: SqlitePool,
}

impl ConnectionProvider {
    /// Creates a provider from a connection string.
    ///
    /// ## Arguments
    /// * `url` - SQLite url, e.g. `sqlite://depot.db?mode=rwc`
    ///
    /// ## Returns
    /// * `Ok(ConnectionProvider)` - url parsed; pool will connect on first use
    /// * `Err(ConfigError::MissingDatabaseUrl)` - url empty or blank
    /// * `Err(ConfigError::InvalidDatabaseUrl)` - url rejected by the driver
    pub fn new(url: &str) -> Result<Self, ConfigError> {
        let url = url.trim();

        if url.is_empty() {
            return Err(ConfigError::MissingDatabaseUrl);
        }

        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| ConfigError::InvalidDatabaseUrl {
                url: url.to_string(),
                reason: e.to_string(),
            })?
            // WAL mode: readers don't block writers and vice versa
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .create_if_missing(true);

        debug!(url = %url, "database url validated");

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_lazy_with(options);

        info!(max_connections = MAX_CONNECTIONS, "connection provider ready");

        Ok(ConnectionProvider { pool })
    }

    /// Creates a provider over an in-memory database (for tests and demos).
    ///
    /// An in-memory SQLite database lives and dies with its connection, so
    /// the pool is capped at a single connection that is never recycled.
    pub fn in_memory() -> Self {
        let options = SqliteConnectOptions::new()
            .in_memory(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_lazy_with(options);

        ConnectionProvider { pool }
    }

    /// Acquires a connection scoped to one operation.
    ///
    /// The handle returns to the pool when dropped, which the repository
    /// relies on for release-on-every-exit-path.
    pub async fn acquire(&self) -> Result<PoolConnection<Sqlite>, sqlx::Error> {
        self.pool.acquire().await
    }

    /// Checks whether the store answers a trivial probe.
    pub async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    /// Closes the pool. Subsequent operations will fail.
    pub async fn close(&self) {
        info!("closing connection provider");
        self.pool.close().await;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
