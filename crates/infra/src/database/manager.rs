//! Database connection manager backed by an r2d2 SQLite pool.

use std::path::{Path, PathBuf};

use coachbook_domain::{CoachBookError, Result};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;
use tracing::info;

use crate::errors::InfraError;

/// Connection pool over plain SQLite.
pub type SqlitePool = r2d2::Pool<SqliteConnectionManager>;

/// One pooled connection.
pub type PooledSqliteConnection = r2d2::PooledConnection<SqliteConnectionManager>;

const SCHEMA_VERSION: i32 = 1;
const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Database manager that wraps an [`SqlitePool`].
pub struct DbManager {
    pool: SqlitePool,
    path: PathBuf,
}

impl DbManager {
    /// Create a new manager with the given pool size.
    pub fn new<P: AsRef<Path>>(db_path: P, pool_size: u32) -> Result<Self> {
        let path = db_path.as_ref().to_path_buf();

        let manager = SqliteConnectionManager::file(&path).with_init(|conn| {
            conn.pragma_update(None, "journal_mode", "WAL")?;
            conn.pragma_update(None, "foreign_keys", "ON")?;
            conn.pragma_update(None, "busy_timeout", 5_000)?;
            Ok(())
        });

        let pool = r2d2::Pool::builder()
            .max_size(pool_size.max(1))
            .build(manager)
            .map_err(InfraError::from)?;

        info!(
            db_path = %path.display(),
            max_connections = pool.max_size(),
            "sqlite pool initialised"
        );

        Ok(Self { pool, path })
    }

    /// Clone a handle to the underlying pool.
    pub fn pool(&self) -> SqlitePool {
        self.pool.clone()
    }

    /// Acquire a connection from the pool.
    pub fn get_connection(&self) -> Result<PooledSqliteConnection> {
        self.pool.get().map_err(|err| InfraError::from(err).into())
    }

    /// Ensure the full schema exists on the current database.
    pub fn run_migrations(&self) -> Result<()> {
        let conn = self.get_connection()?;
        conn.execute_batch(SCHEMA_SQL).map_err(map_sql_error)?;
        conn.execute(
            "INSERT OR IGNORE INTO schema_version (version, applied_at)
             VALUES (?, CAST(strftime('%s','now') AS INTEGER))",
            params![SCHEMA_VERSION],
        )
        .map_err(map_sql_error)?;
        Ok(())
    }

    /// Return the configured database path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Perform a health check to verify database connectivity.
    pub fn health_check(&self) -> Result<()> {
        let conn = self.get_connection()?;
        conn.query_row("SELECT 1", params![], |row| row.get::<_, i32>(0))
            .map_err(map_sql_error)?;
        Ok(())
    }
}

fn map_sql_error(err: rusqlite::Error) -> CoachBookError {
    CoachBookError::from(InfraError::from(err))
}
