//! Database connection and pool management.

use exn::ResultExt;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteSynchronous};
use std::path::Path;
use tracing::instrument;

use crate::error::{ErrorKind, Result};

/// Embedded migrations that are run automatically on connect.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
// SQLite allows a single writer; a handful of pooled readers covers
// concurrent request handling without fighting over the write lock.
const MAX_CONNECTIONS: u32 = 5;

/// Database connection pool for the catalog.
///
/// This is the main entry point for interacting with the catalog database.
/// It manages the SQLite connection pool and provides access to repositories.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    async fn new(options: SqliteConnectOptions, max: Option<u32>) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max.unwrap_or(MAX_CONNECTIONS))
            .connect_with(options)
            .await
            .or_raise(|| ErrorKind::Database)?;
        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Connect to the catalog database at the given path.
    ///
    /// Creates the database file if it doesn't exist and runs migrations.
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let options = Self::base_options().filename(path).create_if_missing(true);
        Self::new(options, None).await
    }

    /// Connect to an in-memory database (useful for testing).
    ///
    /// Note:
    /// - In-memory databases are destroyed when the connection closes.
    /// - Do NOT apply `#[cfg(test)]` so that other crates can also use this in their tests.
    pub async fn connect_in_memory() -> Result<Self> {
        let options = Self::base_options().filename(":memory:");
        // In-memory database must either use the same cache `.shared_cache(true)`,
        // or be limited to one connection. Otherwise parallel connections will
        // see different databases that contain different data.
        Self::new(options, Some(1)).await
    }

    /// Base connection options shared between file and in-memory databases.
    fn base_options() -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            // Enable WAL mode for better concurrent read performance
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            // Foreign key enforcement: inserting a book with an unknown
            // category_id must fail at the database even if a caller skipped
            // validation.
            .foreign_keys(true)
            // PRAGMA synchronous = NORMAL (balance between safety and speed)
            .synchronous(SqliteSynchronous::Normal)
            // PRAGMA busy_timeout = 1500ms
            // Concurrent writes from parallel requests queue on SQLite's
            // single writer; a short timeout absorbs that instead of
            // surfacing SQLITE_BUSY immediately.
            .busy_timeout(std::time::Duration::from_millis(1500))
    }

    /// Run database migrations.
    ///
    /// This is called automatically by `connect` and `connect_in_memory`,
    /// but can be called manually if needed.
    #[instrument(name = "performing database migrations", skip(self))]
    async fn migrate(&self) -> Result<()> {
        MIGRATOR.run(&self.pool).await.or_raise(|| ErrorKind::Migration)
    }

    /// Get a reference to the underlying connection pool.
    ///
    /// This is useful for running custom queries or transactions.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    ///
    /// This waits for all connections to be returned to the pool and then
    /// closes them. After calling this, the Database instance should not
    /// be used.
    pub async fn close(&self) {
        // Let SQLite update query planner statistics
        _ = sqlx::query("PRAGMA optimize").execute(&self.pool).await;
        self.pool.close().await;
    }
}
