//! Google Calendar wire types
//!
//! Serde shapes for the Calendar v3 events API, plus the conversions to
//! and from the engine-facing event types.

use chrono::{DateTime, Utc};
use coachbook_domain::{
    CalendarEvent, CoachBookError, EventAttendee, EventDraft, EventPatch, EventStamp, Result,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleEventTime {
    #[serde(rename = "dateTime", skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(rename = "timeZone", skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    /// All-day events carry a bare date instead of a timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleAttendee {
    pub email: String,
    #[serde(rename = "displayName", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Full event payload for `events.insert`.
#[derive(Debug, Serialize)]
pub struct GoogleEventRequest {
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start: GoogleEventTime,
    pub end: GoogleEventTime,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attendees: Vec<GoogleAttendee>,
}

/// Partial payload for `events.patch`; only present fields are sent.
#[derive(Debug, Default, Serialize)]
pub struct GoogleEventPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<GoogleEventTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<GoogleEventTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<GoogleAttendee>>,
}

/// Event as returned by the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleEvent {
    pub id: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "htmlLink")]
    pub html_link: Option<String>,
    #[serde(rename = "hangoutLink")]
    pub hangout_link: Option<String>,
    pub start: GoogleEventTime,
    pub end: GoogleEventTime,
    pub attendees: Option<Vec<GoogleAttendee>>,
}

#[derive(Debug, Deserialize)]
pub struct GoogleEventsResponse {
    #[serde(default)]
    pub items: Vec<GoogleEvent>,
}

impl From<&EventStamp> for GoogleEventTime {
    fn from(stamp: &EventStamp) -> Self {
        Self {
            date_time: Some(stamp.date_time.clone()),
            time_zone: Some(stamp.time_zone.clone()),
            date: None,
        }
    }
}

impl From<&EventAttendee> for GoogleAttendee {
    fn from(attendee: &EventAttendee) -> Self {
        Self { email: attendee.email.clone(), display_name: attendee.display_name.clone() }
    }
}

impl From<&EventDraft> for GoogleEventRequest {
    fn from(draft: &EventDraft) -> Self {
        Self {
            summary: draft.summary.clone(),
            description: draft.description.clone(),
            start: (&draft.start).into(),
            end: (&draft.end).into(),
            attendees: draft.attendees.iter().map(GoogleAttendee::from).collect(),
        }
    }
}

impl From<&EventPatch> for GoogleEventPatch {
    fn from(patch: &EventPatch) -> Self {
        Self {
            summary: patch.summary.clone(),
            description: patch.description.clone(),
            start: patch.start.as_ref().map(GoogleEventTime::from),
            end: patch.end.as_ref().map(GoogleEventTime::from),
            attendees: patch
                .attendees
                .as_ref()
                .map(|list| list.iter().map(GoogleAttendee::from).collect()),
        }
    }
}

impl GoogleEvent {
    /// Convert into the engine-facing event shape.
    pub fn into_calendar_event(self) -> Result<CalendarEvent> {
        let start = parse_event_time(&self.start, "start")?;
        let end = parse_event_time(&self.end, "end")?;

        Ok(CalendarEvent {
            id: self.id,
            title: self.summary.unwrap_or_else(|| "Untitled event".to_string()),
            description: self.description,
            start,
            end,
            html_link: self.html_link,
            meet_link: self.hangout_link,
            attendees: self
                .attendees
                .unwrap_or_default()
                .into_iter()
                .map(|attendee| EventAttendee {
                    email: attendee.email,
                    display_name: attendee.display_name,
                })
                .collect(),
        })
    }
}

fn parse_event_time(value: &GoogleEventTime, field: &str) -> Result<DateTime<Utc>> {
    if let Some(ref date_time) = value.date_time {
        return DateTime::parse_from_rfc3339(date_time)
            .map(|stamp| stamp.with_timezone(&Utc))
            .map_err(|err| {
                CoachBookError::InvalidInput(format!(
                    "invalid {field} timestamp '{date_time}': {err}"
                ))
            });
    }

    if let Some(ref date) = value.date {
        let midnight = date
            .parse::<chrono::NaiveDate>()
            .map_err(|err| {
                CoachBookError::InvalidInput(format!("invalid {field} date '{date}': {err}"))
            })?
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| {
                CoachBookError::InvalidInput(format!("invalid {field} date '{date}'"))
            })?;
        return Ok(midnight.and_utc());
    }

    Err(CoachBookError::InvalidInput(format!("event {field} carries neither dateTime nor date")))
}
