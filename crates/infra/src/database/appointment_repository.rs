//! SQLite-backed implementation of the AppointmentRepository port.
//!
//! The insert is a conditional write: the slot-conflict check and the row
//! insert run inside one transaction on one pooled connection, so two
//! racing bookings for the same slot cannot both commit.

use async_trait::async_trait;
use chrono::NaiveDate;
use coachbook_core::AppointmentRepository;
use coachbook_domain::{
    Appointment, AppointmentStatus, CoachBookError, Result, SessionType,
};
use rusqlite::types::Type;
use rusqlite::{OptionalExtension, Row, ToSql};
use tracing::{debug, instrument};

use super::manager::SqlitePool;
use crate::errors::InfraError;

const APPOINTMENT_COLUMNS: &str = "id, coach_id, coach_name, talent_id, talent_name, \
     talent_email, date, time, duration_minutes, session_type, status, notes, \
     google_event_id, meet_link, calendar_link, created_at, updated_at";

/// SQLite implementation of AppointmentRepository.
pub struct SqliteAppointmentRepository {
    pool: SqlitePool,
}

impl SqliteAppointmentRepository {
    /// Create a new appointment repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppointmentRepository for SqliteAppointmentRepository {
    #[instrument(skip(self, appointment), fields(appointment_id = %appointment.id))]
    async fn insert(&self, appointment: &Appointment) -> Result<()> {
        let mut conn = self.pool.get().map_err(InfraError::from)?;
        let tx = conn.transaction().map_err(InfraError::from)?;

        let holder: Option<String> = tx
            .query_row(
                "SELECT talent_name FROM appointments
                 WHERE coach_id = ?1 AND date = ?2 AND time = ?3 AND status != 'cancelled'
                 LIMIT 1",
                [
                    &appointment.coach_id as &dyn ToSql,
                    &appointment.date.to_string(),
                    &appointment.time,
                ]
                .as_ref(),
                |row| row.get(0),
            )
            .optional()
            .map_err(InfraError::from)?;

        if let Some(talent_name) = holder {
            return Err(CoachBookError::SlotTaken(talent_name));
        }

        tx.execute(
            "INSERT INTO appointments (
                id, coach_id, coach_name, talent_id, talent_name, talent_email,
                date, time, duration_minutes, session_type, status, notes,
                google_event_id, meet_link, calendar_link, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
            [
                &appointment.id as &dyn ToSql,
                &appointment.coach_id,
                &appointment.coach_name,
                &appointment.talent_id,
                &appointment.talent_name,
                &appointment.talent_email,
                &appointment.date.to_string(),
                &appointment.time,
                &appointment.duration_minutes,
                &appointment.session_type.as_str(),
                &appointment.status.as_str(),
                &appointment.notes,
                &appointment.google_event_id,
                &appointment.meet_link,
                &appointment.calendar_link,
                &appointment.created_at,
                &appointment.updated_at,
            ]
            .as_ref(),
        )
        .map_err(InfraError::from)?;

        tx.commit().map_err(InfraError::from)?;

        debug!(
            appointment_id = %appointment.id,
            coach_id = %appointment.coach_id,
            "inserted appointment"
        );

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get(&self, id: &str) -> Result<Appointment> {
        let conn = self.pool.get().map_err(InfraError::from)?;

        conn.query_row(
            &format!("SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = ?1"),
            [&id as &dyn ToSql].as_ref(),
            appointment_from_row,
        )
        .optional()
        .map_err(InfraError::from)?
        .ok_or_else(|| CoachBookError::NotFound(format!("appointment {id}")))
    }

    #[instrument(skip(self))]
    async fn set_status(&self, id: &str, status: AppointmentStatus) -> Result<()> {
        self.update_text_field(id, "status", status.as_str())
    }

    #[instrument(skip(self, meet_link))]
    async fn set_meet_link(&self, id: &str, meet_link: &str) -> Result<()> {
        self.update_text_field(id, "meet_link", meet_link)
    }

    #[instrument(skip(self, event_id, calendar_link))]
    async fn set_calendar_event(
        &self,
        id: &str,
        event_id: &str,
        calendar_link: &str,
    ) -> Result<()> {
        let conn = self.pool.get().map_err(InfraError::from)?;
        let now = chrono::Utc::now().timestamp();

        let changed = conn
            .execute(
                "UPDATE appointments
                 SET google_event_id = ?1, calendar_link = ?2, updated_at = ?3
                 WHERE id = ?4",
                [&event_id as &dyn ToSql, &calendar_link, &now, &id].as_ref(),
            )
            .map_err(InfraError::from)?;

        if changed == 0 {
            return Err(CoachBookError::NotFound(format!("appointment {id}")));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_active_at(
        &self,
        coach_id: &str,
        date: NaiveDate,
        time: &str,
    ) -> Result<Option<Appointment>> {
        let conn = self.pool.get().map_err(InfraError::from)?;

        conn.query_row(
            &format!(
                "SELECT {APPOINTMENT_COLUMNS} FROM appointments
                 WHERE coach_id = ?1 AND date = ?2 AND time = ?3 AND status != 'cancelled'
                 LIMIT 1"
            ),
            [&coach_id as &dyn ToSql, &date.to_string(), &time].as_ref(),
            appointment_from_row,
        )
        .optional()
        .map_err(|err| InfraError::from(err).into())
    }

    #[instrument(skip(self))]
    async fn list_for_coach_date(
        &self,
        coach_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>> {
        self.query_list(
            &format!(
                "SELECT {APPOINTMENT_COLUMNS} FROM appointments
                 WHERE coach_id = ?1 AND date = ?2
                 ORDER BY time ASC"
            ),
            [&coach_id as &dyn ToSql, &date.to_string()].as_ref(),
        )
    }

    #[instrument(skip(self))]
    async fn list_for_coach(&self, coach_id: &str) -> Result<Vec<Appointment>> {
        self.query_list(
            &format!(
                "SELECT {APPOINTMENT_COLUMNS} FROM appointments
                 WHERE coach_id = ?1
                 ORDER BY date ASC, time ASC"
            ),
            [&coach_id as &dyn ToSql].as_ref(),
        )
    }

    #[instrument(skip(self))]
    async fn list_for_talent(&self, talent_id: &str) -> Result<Vec<Appointment>> {
        self.query_list(
            &format!(
                "SELECT {APPOINTMENT_COLUMNS} FROM appointments
                 WHERE talent_id = ?1
                 ORDER BY date ASC, time ASC"
            ),
            [&talent_id as &dyn ToSql].as_ref(),
        )
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<()> {
        let conn = self.pool.get().map_err(InfraError::from)?;
        conn.execute("DELETE FROM appointments WHERE id = ?1", [&id as &dyn ToSql].as_ref())
            .map_err(InfraError::from)?;
        Ok(())
    }
}

impl SqliteAppointmentRepository {
    fn update_text_field(&self, id: &str, column: &str, value: &str) -> Result<()> {
        let conn = self.pool.get().map_err(InfraError::from)?;
        let now = chrono::Utc::now().timestamp();

        let changed = conn
            .execute(
                &format!("UPDATE appointments SET {column} = ?1, updated_at = ?2 WHERE id = ?3"),
                [&value as &dyn ToSql, &now, &id].as_ref(),
            )
            .map_err(InfraError::from)?;

        if changed == 0 {
            return Err(CoachBookError::NotFound(format!("appointment {id}")));
        }
        Ok(())
    }

    fn query_list(&self, sql: &str, params: &[&dyn ToSql]) -> Result<Vec<Appointment>> {
        let conn = self.pool.get().map_err(InfraError::from)?;
        let mut stmt = conn.prepare(sql).map_err(InfraError::from)?;
        let rows = stmt
            .query_map(params, appointment_from_row)
            .map_err(InfraError::from)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(InfraError::from)?;
        Ok(rows)
    }
}

fn appointment_from_row(row: &Row<'_>) -> rusqlite::Result<Appointment> {
    let date_raw: String = row.get(6)?;
    let date = date_raw
        .parse::<NaiveDate>()
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(err)))?;

    let session_raw: String = row.get(9)?;
    let session_type = SessionType::parse(&session_raw)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(9, Type::Text, Box::new(err)))?;

    let status_raw: String = row.get(10)?;
    let status = AppointmentStatus::parse(&status_raw)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(10, Type::Text, Box::new(err)))?;

    Ok(Appointment {
        id: row.get(0)?,
        coach_id: row.get(1)?,
        coach_name: row.get(2)?,
        talent_id: row.get(3)?,
        talent_name: row.get(4)?,
        talent_email: row.get(5)?,
        date,
        time: row.get(7)?,
        duration_minutes: row.get(8)?,
        session_type,
        status,
        notes: row.get(11)?,
        google_event_id: row.get(12)?,
        meet_link: row.get(13)?,
        calendar_link: row.get(14)?,
        created_at: row.get(15)?,
        updated_at: row.get(16)?,
    })
}
