//! Meeting location generation
//!
//! The meet link is what users actually join with, so it is minted locally
//! and survives calendar-sync failures. Room names derive from the
//! appointment id.

use coachbook_core::MeetingLocations;
use coachbook_domain::CalendarConfig;

/// Generates meeting-room and calendar links.
pub struct MeetRoomLinks {
    meet_base_url: String,
}

impl MeetRoomLinks {
    /// Create a generator from the calendar configuration.
    pub fn new(config: &CalendarConfig) -> Self {
        Self { meet_base_url: config.meet_base_url.trim_end_matches('/').to_string() }
    }
}

impl MeetingLocations for MeetRoomLinks {
    fn meet_link(&self, appointment_id: &str) -> String {
        format!("{}/coachbook-{appointment_id}", self.meet_base_url)
    }

    fn calendar_link(&self, event_id: &str) -> String {
        format!("https://calendar.google.com/calendar/event?eid={event_id}")
    }
}
