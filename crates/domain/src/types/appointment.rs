//! Appointment lifecycle types
//!
//! An appointment links one coach and one talent to one half-hour slot.
//! The record here is the single source of truth; the external calendar
//! event and the meeting link are derived artifacts reconciled to it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{CoachBookError, Result};

/// Lifecycle state of an appointment.
///
/// Transitions only move forward: `Pending -> Confirmed`,
/// `Pending -> Cancelled`, `Confirmed -> Cancelled`. Nothing leaves
/// `Cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(CoachBookError::InvalidInput(format!(
                "unknown appointment status '{other}'"
            ))),
        }
    }

    /// Whether the status admits no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Kind of coaching session being booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    CvReview,
    InterviewPrep,
    ConfidenceCoaching,
    Other,
}

impl SessionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CvReview => "cv_review",
            Self::InterviewPrep => "interview_prep",
            Self::ConfidenceCoaching => "confidence_coaching",
            Self::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "cv_review" => Ok(Self::CvReview),
            "interview_prep" => Ok(Self::InterviewPrep),
            "confidence_coaching" => Ok(Self::ConfidenceCoaching),
            "other" => Ok(Self::Other),
            unknown => Err(CoachBookError::InvalidInput(format!(
                "unknown session type '{unknown}'"
            ))),
        }
    }

    /// Human-readable label used in event titles and emails.
    pub fn label(self) -> &'static str {
        match self {
            Self::CvReview => "CV Review",
            Self::InterviewPrep => "Interview Prep",
            Self::ConfidenceCoaching => "Confidence Coaching",
            Self::Other => "Coaching Session",
        }
    }
}

/// A booking linking one coach and one talent to one slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub coach_id: String,
    pub coach_name: String,
    pub talent_id: String,
    pub talent_name: String,
    pub talent_email: String,
    /// Calendar date of the slot, no time component.
    pub date: NaiveDate,
    /// Coach-local time-of-day string, e.g. `"09:30"`.
    pub time: String,
    pub duration_minutes: u32,
    pub session_type: SessionType,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    /// Identifier of the mirrored provider event, set once synchronized.
    pub google_event_id: Option<String>,
    pub meet_link: Option<String>,
    pub calendar_link: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Appointment {
    /// An appointment holds its slot while it is not cancelled.
    pub fn is_active(&self) -> bool {
        self.status != AppointmentStatus::Cancelled
    }
}

/// Incoming booking request, before an identifier or status exists.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    pub coach_id: String,
    pub coach_name: String,
    pub talent_id: String,
    pub talent_name: String,
    pub talent_email: String,
    pub date: NaiveDate,
    pub time: String,
    #[serde(default = "default_duration")]
    pub duration_minutes: u32,
    pub session_type: SessionType,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_duration() -> u32 {
    crate::constants::DEFAULT_SESSION_MINUTES
}

/// Trim free-text notes; an empty or whitespace-only value becomes absent.
pub fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
