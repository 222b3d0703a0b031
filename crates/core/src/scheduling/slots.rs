//! Slot resolution and validation helpers
//!
//! Pure functions; the service composes them with repository reads. The
//! bookable set is recomputed on every read because availability is
//! contended by concurrent talents.

use std::collections::BTreeSet;

use coachbook_domain::constants::SLOT_INTERVAL_MINUTES;
use coachbook_domain::utils::timezone::parse_slot_time;
use coachbook_domain::{Appointment, CoachBookError, Result};

/// Published slots minus those held by a non-cancelled appointment,
/// sorted for display.
pub fn resolve_bookable(published: &[String], appointments: &[Appointment]) -> Vec<String> {
    let taken: BTreeSet<&str> = appointments
        .iter()
        .filter(|appointment| appointment.is_active())
        .map(|appointment| appointment.time.as_str())
        .collect();

    let unique: BTreeSet<&String> =
        published.iter().filter(|slot| !taken.contains(slot.as_str())).collect();

    unique.into_iter().cloned().collect()
}

/// Validate one slot string: `HH:MM` on the booking grid boundary.
pub fn validate_slot(slot: &str) -> Result<()> {
    use chrono::Timelike;

    let time = parse_slot_time(slot)?;
    if time.minute() % SLOT_INTERVAL_MINUTES != 0 {
        return Err(CoachBookError::InvalidInput(format!(
            "slot '{slot}' is not on a {SLOT_INTERVAL_MINUTES}-minute boundary"
        )));
    }
    Ok(())
}

/// Validate and deduplicate a published slot set, preserving nothing about
/// input order.
pub fn normalize_slot_set(slots: &[String]) -> Result<Vec<String>> {
    let mut unique = BTreeSet::new();
    for slot in slots {
        validate_slot(slot)?;
        unique.insert(slot.clone());
    }
    Ok(unique.into_iter().collect())
}
