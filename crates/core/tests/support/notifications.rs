//! Mock notification transports and meeting locations

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use coachbook_core::{MeetingLocations, NotificationTransport};
use coachbook_domain::{AppointmentNotice, CoachBookError, Result};

/// Recording transport double; can be flipped into a failing mode.
pub struct MockTransport {
    channel: &'static str,
    failing: AtomicBool,
    delivered: Mutex<Vec<AppointmentNotice>>,
}

impl MockTransport {
    pub fn new(channel: &'static str) -> Self {
        Self { channel, failing: AtomicBool::new(false), delivered: Mutex::new(Vec::new()) }
    }

    pub fn set_failing(&self, value: bool) {
        self.failing.store(value, Ordering::SeqCst);
    }

    pub fn delivered(&self) -> Vec<AppointmentNotice> {
        self.delivered.lock().unwrap().clone()
    }

    pub fn delivery_count(&self) -> usize {
        self.delivered.lock().unwrap().len()
    }
}

#[async_trait]
impl NotificationTransport for MockTransport {
    fn channel(&self) -> &'static str {
        self.channel
    }

    async fn deliver(&self, notice: &AppointmentNotice) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CoachBookError::Network(format!("{} rejected the send", self.channel)));
        }
        self.delivered.lock().unwrap().push(notice.clone());
        Ok(())
    }
}

/// Deterministic meeting link generator.
pub struct MockMeetingLocations;

impl MeetingLocations for MockMeetingLocations {
    fn meet_link(&self, appointment_id: &str) -> String {
        format!("https://meet.test/{appointment_id}")
    }

    fn calendar_link(&self, event_id: &str) -> String {
        format!("https://calendar.test/{event_id}")
    }
}
