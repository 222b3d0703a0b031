//! Published coach availability
//!
//! One record per coach and date. Saving a record replaces the whole slot
//! set for that date; slots are never merged.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The set of slots a coach has published as offerable for one date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Availability {
    pub coach_id: String,
    pub date: NaiveDate,
    /// Coach-local `"HH:MM"` strings, unique, unordered in storage.
    pub time_slots: Vec<String>,
    /// IANA zone name the slot times are expressed in.
    pub timezone: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Availability {
    /// Slots sorted for display. Storage order is not meaningful.
    pub fn sorted_slots(&self) -> Vec<String> {
        let mut slots = self.time_slots.clone();
        slots.sort();
        slots
    }
}
