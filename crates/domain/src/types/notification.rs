//! Transactional notification payloads

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::appointment::SessionType;

/// Which lifecycle event is being announced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// A talent just booked; the appointment is pending.
    Booked,
    /// The coach confirmed the appointment.
    Confirmed,
    /// Any other status change (cancellation included).
    Updated,
}

/// Who a single notice is addressed to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipient {
    pub email: String,
    pub name: String,
}

/// One notice to one recipient about one appointment event.
///
/// The talent and the coach each get their own notice; delivery of one must
/// never block delivery of the other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentNotice {
    pub kind: NoticeKind,
    pub recipient: Recipient,
    pub coach_name: String,
    pub talent_name: String,
    pub date: NaiveDate,
    /// Coach-local time-of-day string.
    pub time: String,
    pub timezone: String,
    pub session_type: SessionType,
    pub meet_link: Option<String>,
    pub calendar_link: Option<String>,
}
