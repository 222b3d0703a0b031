//! SQLite-backed implementation of the ProfileDirectory port.
//!
//! Profiles are owned by the wider application; the engine only reads the
//! email and display name needed for notifications. The upsert exists so
//! deployments and tests can seed the directory.

use async_trait::async_trait;
use chrono::Utc;
use coachbook_core::ProfileDirectory;
use coachbook_domain::{CoachBookError, Profile, Result, Role};
use rusqlite::{OptionalExtension, ToSql};
use tracing::instrument;

use super::manager::SqlitePool;
use crate::errors::InfraError;

/// SQLite implementation of ProfileDirectory.
pub struct SqliteProfileRepository {
    pool: SqlitePool,
}

impl SqliteProfileRepository {
    /// Create a new profile repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert or update a profile row.
    #[instrument(skip(self, profile))]
    pub fn upsert(&self, user_id: &str, role: Role, profile: &Profile) -> Result<()> {
        let conn = self.pool.get().map_err(InfraError::from)?;
        let now = Utc::now().timestamp();

        conn.execute(
            "INSERT INTO profiles (user_id, role, email, display_name, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)
             ON CONFLICT(user_id, role) DO UPDATE SET
                email = excluded.email,
                display_name = excluded.display_name,
                updated_at = excluded.updated_at",
            [
                &user_id as &dyn ToSql,
                &role.as_str(),
                &profile.email,
                &profile.display_name,
                &now,
            ]
            .as_ref(),
        )
        .map_err(InfraError::from)?;

        Ok(())
    }
}

#[async_trait]
impl ProfileDirectory for SqliteProfileRepository {
    #[instrument(skip(self))]
    async fn get_profile(&self, user_id: &str, role: Role) -> Result<Profile> {
        let conn = self.pool.get().map_err(InfraError::from)?;

        conn.query_row(
            "SELECT email, display_name FROM profiles WHERE user_id = ?1 AND role = ?2",
            [&user_id as &dyn ToSql, &role.as_str()].as_ref(),
            |row| Ok(Profile { email: row.get(0)?, display_name: row.get(1)? }),
        )
        .optional()
        .map_err(InfraError::from)?
        .ok_or_else(|| {
            CoachBookError::NotFound(format!("profile {user_id}/{}", role.as_str()))
        })
    }
}
