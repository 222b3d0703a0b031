//! SQLite-backed implementation of the AvailabilityRepository port.
//!
//! One row per `(coach_id, date)`; saving upserts the whole slot set.
//! Slots are stored as a comma-joined string of `HH:MM` values.

use async_trait::async_trait;
use chrono::NaiveDate;
use coachbook_core::AvailabilityRepository;
use coachbook_domain::{Availability, Result};
use rusqlite::types::Type;
use rusqlite::{OptionalExtension, Row, ToSql};
use tracing::{debug, instrument};

use super::manager::SqlitePool;
use crate::errors::InfraError;

/// SQLite implementation of AvailabilityRepository.
pub struct SqliteAvailabilityRepository {
    pool: SqlitePool,
}

impl SqliteAvailabilityRepository {
    /// Create a new availability repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AvailabilityRepository for SqliteAvailabilityRepository {
    #[instrument(skip(self, availability), fields(coach_id = %availability.coach_id, date = %availability.date))]
    async fn replace(&self, availability: &Availability) -> Result<()> {
        let conn = self.pool.get().map_err(InfraError::from)?;
        let slots = availability.time_slots.join(",");

        conn.execute(
            "INSERT INTO coach_availabilities (
                coach_id, date, time_slots, timezone, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(coach_id, date) DO UPDATE SET
                time_slots = excluded.time_slots,
                timezone = excluded.timezone,
                updated_at = excluded.updated_at",
            [
                &availability.coach_id as &dyn ToSql,
                &availability.date.to_string(),
                &slots,
                &availability.timezone,
                &availability.created_at,
                &availability.updated_at,
            ]
            .as_ref(),
        )
        .map_err(InfraError::from)?;

        debug!(
            coach_id = %availability.coach_id,
            date = %availability.date,
            slots = availability.time_slots.len(),
            "replaced availability"
        );

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get(&self, coach_id: &str, date: NaiveDate) -> Result<Option<Availability>> {
        let conn = self.pool.get().map_err(InfraError::from)?;

        conn.query_row(
            "SELECT coach_id, date, time_slots, timezone, created_at, updated_at
             FROM coach_availabilities
             WHERE coach_id = ?1 AND date = ?2",
            [&coach_id as &dyn ToSql, &date.to_string()].as_ref(),
            availability_from_row,
        )
        .optional()
        .map_err(|err| InfraError::from(err).into())
    }
}

fn availability_from_row(row: &Row<'_>) -> rusqlite::Result<Availability> {
    let date_raw: String = row.get(1)?;
    let date = date_raw
        .parse::<NaiveDate>()
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(err)))?;

    let slots_raw: String = row.get(2)?;
    let time_slots =
        slots_raw.split(',').filter(|slot| !slot.is_empty()).map(String::from).collect();

    Ok(Availability {
        coach_id: row.get(0)?,
        date,
        time_slots,
        timezone: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}
