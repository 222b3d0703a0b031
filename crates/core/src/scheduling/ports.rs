//! Port interfaces for appointment scheduling
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use async_trait::async_trait;
use chrono::NaiveDate;
use coachbook_domain::{Appointment, AppointmentStatus, Availability, Profile, Result, Role};

/// Trait for persisting appointments.
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Insert a new appointment.
    ///
    /// The insert is conditional on the slot being free: implementations
    /// must fail with [`coachbook_domain::CoachBookError::SlotTaken`] when a
    /// non-cancelled appointment already holds `(coach_id, date, time)`,
    /// without committing the new record.
    async fn insert(&self, appointment: &Appointment) -> Result<()>;

    /// Load an appointment by id.
    async fn get(&self, id: &str) -> Result<Appointment>;

    /// Write a new lifecycle status.
    async fn set_status(&self, id: &str, status: AppointmentStatus) -> Result<()>;

    /// Persist a generated meeting-room link.
    async fn set_meet_link(&self, id: &str, meet_link: &str) -> Result<()>;

    /// Persist the mirrored provider event id and its HTML link.
    async fn set_calendar_event(
        &self,
        id: &str,
        event_id: &str,
        calendar_link: &str,
    ) -> Result<()>;

    /// Find the non-cancelled appointment holding a slot, if any.
    async fn find_active_at(
        &self,
        coach_id: &str,
        date: NaiveDate,
        time: &str,
    ) -> Result<Option<Appointment>>;

    /// All appointments for a coach on one date, any status.
    async fn list_for_coach_date(
        &self,
        coach_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>>;

    /// All appointments for a coach, any status.
    async fn list_for_coach(&self, coach_id: &str) -> Result<Vec<Appointment>>;

    /// All appointments booked by a talent, any status.
    async fn list_for_talent(&self, talent_id: &str) -> Result<Vec<Appointment>>;

    /// Hard delete. Not used by the booking flow; kept for administrative
    /// cleanup.
    async fn delete(&self, id: &str) -> Result<()>;
}

/// Trait for persisting published availability.
#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    /// Full replace of the slot set for `(coach_id, date)`.
    async fn replace(&self, availability: &Availability) -> Result<()>;

    /// Load the published record for `(coach_id, date)`, if any.
    async fn get(&self, coach_id: &str, date: NaiveDate) -> Result<Option<Availability>>;
}

/// Trait for resolving a user's contact details before notifying them.
#[async_trait]
pub trait ProfileDirectory: Send + Sync {
    async fn get_profile(&self, user_id: &str, role: Role) -> Result<Profile>;
}

/// Trait for minting meeting locations.
///
/// A meet link must be generated even when calendar sync is skipped or
/// fails; the link, not the calendar event, is what users join with.
pub trait MeetingLocations: Send + Sync {
    /// Room URL for an appointment.
    fn meet_link(&self, appointment_id: &str) -> String;

    /// HTML link to the mirrored provider event.
    fn calendar_link(&self, event_id: &str) -> String;
}
