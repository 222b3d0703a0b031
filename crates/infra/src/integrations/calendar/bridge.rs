//! Calendar sync bridge
//!
//! Implements the core `CalendarBridge` port over the Google client.
//! Sync is idempotent: an appointment that already carries a provider
//! event id is never mirrored twice.

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::Tz;
use coachbook_core::{CalendarBridge, SyncOutcome};
use coachbook_domain::utils::timezone::{parse_slot_time, parse_zone};
use coachbook_domain::{
    Appointment, CalendarEvent, CoachBookError, EventAttendee, EventDraft, EventPatch, EventStamp,
    Result,
};
use tracing::{debug, info, instrument, warn};

use super::client::GoogleCalendarClient;
use super::types::{GoogleEventPatch, GoogleEventRequest};

/// Google-backed calendar bridge.
pub struct GoogleCalendarBridge {
    client: GoogleCalendarClient,
}

impl GoogleCalendarBridge {
    /// Create a new bridge over an API client.
    pub fn new(client: GoogleCalendarClient) -> Self {
        Self { client }
    }

    /// Build the provider event window for a coach-local slot.
    fn event_window(appointment: &Appointment, coach_timezone: &str) -> Result<(EventStamp, EventStamp)> {
        let zone: Tz = parse_zone(coach_timezone)?;
        let local = appointment.date.and_time(parse_slot_time(&appointment.time)?);

        let start = zone.from_local_datetime(&local).earliest().ok_or_else(|| {
            CoachBookError::InvalidInput(format!(
                "{} on {} does not exist in {coach_timezone}",
                appointment.time, appointment.date
            ))
        })?;
        let end = start + Duration::minutes(i64::from(appointment.duration_minutes));

        Ok((
            EventStamp { date_time: start.to_rfc3339(), time_zone: coach_timezone.to_string() },
            EventStamp { date_time: end.to_rfc3339(), time_zone: coach_timezone.to_string() },
        ))
    }

    fn draft_for(appointment: &Appointment, coach_timezone: &str) -> Result<EventDraft> {
        let (start, end) = Self::event_window(appointment, coach_timezone)?;

        let mut description_lines = vec![format!(
            "{} between {} and {}.",
            appointment.session_type.label(),
            appointment.coach_name,
            appointment.talent_name
        )];
        if let Some(ref notes) = appointment.notes {
            description_lines.push(format!("Notes: {notes}"));
        }
        if let Some(ref meet_link) = appointment.meet_link {
            description_lines.push(format!("Join: {meet_link}"));
        }

        Ok(EventDraft {
            summary: format!(
                "{} with {}",
                appointment.session_type.label(),
                appointment.talent_name
            ),
            description: Some(description_lines.join("\n")),
            start,
            end,
            attendees: vec![EventAttendee {
                email: appointment.talent_email.clone(),
                display_name: Some(appointment.talent_name.clone()),
            }],
        })
    }
}

#[async_trait]
impl CalendarBridge for GoogleCalendarBridge {
    #[instrument(skip(self, appointment), fields(appointment_id = %appointment.id))]
    async fn sync_appointment(
        &self,
        appointment: &Appointment,
        coach_timezone: &str,
    ) -> Result<SyncOutcome> {
        if let Some(ref existing) = appointment.google_event_id {
            debug!(event_id = %existing, "appointment already mirrored, skipping");
            return Ok(SyncOutcome { event_id: existing.clone(), created: false });
        }

        let draft = Self::draft_for(appointment, coach_timezone)?;
        let event = self.client.insert_event(&GoogleEventRequest::from(&draft)).await?;

        info!(
            appointment_id = %appointment.id,
            event_id = %event.id,
            "appointment mirrored to calendar"
        );

        Ok(SyncOutcome { event_id: event.id, created: true })
    }

    async fn create_event(&self, draft: &EventDraft) -> Result<CalendarEvent> {
        let event = self.client.insert_event(&GoogleEventRequest::from(draft)).await?;
        event.into_calendar_event()
    }

    async fn update_event(&self, event_id: &str, patch: &EventPatch) -> Result<CalendarEvent> {
        let event = self.client.patch_event(event_id, &GoogleEventPatch::from(patch)).await?;
        event.into_calendar_event()
    }

    async fn delete_event(&self, event_id: &str) -> Result<()> {
        self.client.delete_event(event_id).await
    }

    #[instrument(skip(self))]
    async fn events_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>> {
        let raw = self.client.list_events(&start.to_rfc3339(), &end.to_rfc3339()).await?;

        let mut events = Vec::with_capacity(raw.len());
        for event in raw {
            let id = event.id.clone();
            match event.into_calendar_event() {
                Ok(converted) => events.push(converted),
                Err(err) => {
                    warn!(event_id = %id, error = %err, "skipping unparseable event");
                }
            }
        }
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use coachbook_domain::{AppointmentStatus, SessionType};

    use super::*;

    fn appointment() -> Appointment {
        Appointment {
            id: "a-1".to_string(),
            coach_id: "c-1".to_string(),
            coach_name: "Casey".to_string(),
            talent_id: "t-1".to_string(),
            talent_name: "Taylor".to_string(),
            talent_email: "taylor@example.com".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            time: "09:00".to_string(),
            duration_minutes: 30,
            session_type: SessionType::CvReview,
            status: AppointmentStatus::Confirmed,
            notes: Some("bring questions".to_string()),
            google_event_id: None,
            meet_link: Some("https://meet.jit.si/coachbook-a-1".to_string()),
            calendar_link: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn event_window_uses_coach_zone_and_duration() {
        let (start, end) =
            GoogleCalendarBridge::event_window(&appointment(), "America/Toronto").unwrap();
        assert_eq!(start.date_time, "2025-03-10T09:00:00-04:00");
        assert_eq!(end.date_time, "2025-03-10T09:30:00-04:00");
        assert_eq!(start.time_zone, "America/Toronto");
    }

    #[test]
    fn draft_carries_notes_meet_link_and_attendee() {
        let draft = GoogleCalendarBridge::draft_for(&appointment(), "America/Toronto").unwrap();
        assert_eq!(draft.summary, "CV Review with Taylor");

        let description = draft.description.unwrap();
        assert!(description.contains("Notes: bring questions"));
        assert!(description.contains("Join: https://meet.jit.si/coachbook-a-1"));

        assert_eq!(draft.attendees.len(), 1);
        assert_eq!(draft.attendees[0].email, "taylor@example.com");
    }

    #[test]
    fn bad_zone_is_invalid_input() {
        let err = GoogleCalendarBridge::event_window(&appointment(), "Mars/Olympus").unwrap_err();
        assert!(matches!(err, CoachBookError::InvalidInput(_)));
    }
}
