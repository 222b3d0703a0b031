//! External calendar event shapes
//!
//! These are the engine-facing views of provider events. The wire-level
//! serde structs live with the provider client in the infrastructure layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A timestamp plus the zone it should be rendered in on the provider side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventStamp {
    /// RFC 3339 timestamp.
    pub date_time: String,
    /// IANA zone name.
    pub time_zone: String,
}

/// Someone invited to a provider event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAttendee {
    pub email: String,
    pub display_name: Option<String>,
}

/// Payload for creating a provider event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDraft {
    pub summary: String,
    pub description: Option<String>,
    pub start: EventStamp,
    pub end: EventStamp,
    pub attendees: Vec<EventAttendee>,
}

/// Partial update of a provider event. Only fields that are present are
/// sent; absent fields keep their provider-side value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventPatch {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub start: Option<EventStamp>,
    pub end: Option<EventStamp>,
    pub attendees: Option<Vec<EventAttendee>>,
}

/// A provider event as read back for calendar-grid display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub html_link: Option<String>,
    pub meet_link: Option<String>,
    pub attendees: Vec<EventAttendee>,
}
