//! Timezone conversion for slot display
//!
//! Conversion is display-only. Persisted slot times always stay in the
//! coach's zone together with an explicit zone tag; these functions are
//! applied at presentation boundaries and when building provider event
//! timestamps.

use chrono::{NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;

use crate::errors::{CoachBookError, Result};

/// Parse an IANA zone name such as `"America/Toronto"`.
pub fn parse_zone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| CoachBookError::InvalidInput(format!("unknown timezone '{name}'")))
}

/// Parse a slot time-of-day string of the form `"HH:MM"`.
pub fn parse_slot_time(time: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| CoachBookError::InvalidInput(format!("invalid slot time '{time}'")))
}

/// Convert a wall-clock slot on `date` in `from_zone` into the equivalent
/// wall-clock date and time in `to_zone`.
///
/// The returned date may differ from the input date: a slot near midnight
/// in one zone lands on the adjacent calendar day in another. Ambiguous
/// local times (DST fall-back) resolve to the earlier instant; a skipped
/// local time (DST spring-forward gap) is rejected.
pub fn convert_slot(
    time: &str,
    date: NaiveDate,
    from_zone: &str,
    to_zone: &str,
) -> Result<(NaiveDate, NaiveTime)> {
    let from = parse_zone(from_zone)?;
    let to = parse_zone(to_zone)?;
    let local = date.and_time(parse_slot_time(time)?);

    let instant = from.from_local_datetime(&local).earliest().ok_or_else(|| {
        CoachBookError::InvalidInput(format!(
            "{time} on {date} does not exist in {from_zone}"
        ))
    })?;

    let converted = instant.with_timezone(&to);
    Ok((converted.date_naive(), converted.time()))
}

/// Render a slot as a human-readable label carrying the zone abbreviation,
/// e.g. `"09:00 EDT"`.
pub fn format_slot_with_zone(time: &str, date: NaiveDate, zone: &str) -> Result<String> {
    let tz = parse_zone(zone)?;
    let local = date.and_time(parse_slot_time(time)?);

    let stamped = tz.from_local_datetime(&local).earliest().ok_or_else(|| {
        CoachBookError::InvalidInput(format!("{time} on {date} does not exist in {zone}"))
    })?;

    Ok(stamped.format("%H:%M %Z").to_string())
}
