//! Calendar integration port interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use coachbook_domain::{Appointment, CalendarEvent, EventDraft, EventPatch, Result};

/// Result of mirroring one appointment into the provider calendar.
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    /// Provider event identifier.
    pub event_id: String,
    /// False when the appointment already carried an event id and the call
    /// was a no-op.
    pub created: bool,
}

/// Trait for the external calendar provider bridge.
///
/// All operations require a stored provider credential and return an
/// `Auth` error when it is missing or expired, so callers can prompt
/// re-authentication instead of crashing.
#[async_trait]
pub trait CalendarBridge: Send + Sync {
    /// Mirror a confirmed appointment into the provider calendar.
    ///
    /// Idempotent: when `appointment.google_event_id` is already set the
    /// bridge must not create a second event.
    async fn sync_appointment(
        &self,
        appointment: &Appointment,
        coach_timezone: &str,
    ) -> Result<SyncOutcome>;

    /// Create a provider event.
    async fn create_event(&self, draft: &EventDraft) -> Result<CalendarEvent>;

    /// Partial-field merge update of a provider event.
    async fn update_event(&self, event_id: &str, patch: &EventPatch) -> Result<CalendarEvent>;

    /// Delete a provider event.
    async fn delete_event(&self, event_id: &str) -> Result<()>;

    /// Events within a window, for calendar-grid display.
    async fn events_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>>;
}
