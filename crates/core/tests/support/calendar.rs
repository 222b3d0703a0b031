//! Mock calendar bridge for core integration tests

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use coachbook_core::{CalendarBridge, SyncOutcome};
use coachbook_domain::{
    Appointment, CalendarEvent, CoachBookError, EventDraft, EventPatch, Result,
};

/// In-memory calendar provider double.
///
/// Counts event creations so tests can assert the idempotency contract,
/// and can be flipped into unauthenticated or failing modes.
pub struct MockCalendarBridge {
    authenticated: AtomicBool,
    failing: AtomicBool,
    created: AtomicUsize,
    events: Mutex<Vec<CalendarEvent>>,
}

impl MockCalendarBridge {
    pub fn authenticated() -> Self {
        Self {
            authenticated: AtomicBool::new(true),
            failing: AtomicBool::new(false),
            created: AtomicUsize::new(0),
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn set_authenticated(&self, value: bool) {
        self.authenticated.store(value, Ordering::SeqCst);
    }

    pub fn set_failing(&self, value: bool) {
        self.failing.store(value, Ordering::SeqCst);
    }

    pub fn created_count(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    fn guard(&self) -> Result<()> {
        if !self.authenticated.load(Ordering::SeqCst) {
            return Err(CoachBookError::Auth("calendar session not authenticated".to_string()));
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(CoachBookError::Network("calendar provider unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CalendarBridge for MockCalendarBridge {
    async fn sync_appointment(
        &self,
        appointment: &Appointment,
        _coach_timezone: &str,
    ) -> Result<SyncOutcome> {
        self.guard()?;
        if let Some(existing) = &appointment.google_event_id {
            return Ok(SyncOutcome { event_id: existing.clone(), created: false });
        }
        let sequence = self.created.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(SyncOutcome { event_id: format!("evt-{sequence}"), created: true })
    }

    async fn create_event(&self, draft: &EventDraft) -> Result<CalendarEvent> {
        self.guard()?;
        let sequence = self.created.fetch_add(1, Ordering::SeqCst) + 1;
        let event = CalendarEvent {
            id: format!("evt-{sequence}"),
            title: draft.summary.clone(),
            description: draft.description.clone(),
            start: Utc::now(),
            end: Utc::now(),
            html_link: None,
            meet_link: None,
            attendees: draft.attendees.clone(),
        };
        self.events.lock().unwrap().push(event.clone());
        Ok(event)
    }

    async fn update_event(&self, event_id: &str, patch: &EventPatch) -> Result<CalendarEvent> {
        self.guard()?;
        let mut events = self.events.lock().unwrap();
        let event = events
            .iter_mut()
            .find(|event| event.id == event_id)
            .ok_or_else(|| CoachBookError::NotFound(format!("event {event_id}")))?;
        if let Some(summary) = &patch.summary {
            event.title = summary.clone();
        }
        if let Some(description) = &patch.description {
            event.description = Some(description.clone());
        }
        Ok(event.clone())
    }

    async fn delete_event(&self, event_id: &str) -> Result<()> {
        self.guard()?;
        self.events.lock().unwrap().retain(|event| event.id != event_id);
        Ok(())
    }

    async fn events_between(
        &self,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>> {
        self.guard()?;
        Ok(self.events.lock().unwrap().clone())
    }
}
