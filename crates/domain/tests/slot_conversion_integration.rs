//! Integration tests for slot timezone conversion
//!
//! Scenario-level coverage of the display conversions a coach/talent pair
//! actually hits: a Toronto coach viewed from London, Tokyo and Vancouver,
//! including DST transitions and midnight boundaries.

use chrono::{NaiveDate, Timelike};
use coachbook_domain::{convert_slot, format_slot_with_zone, CoachBookError};

fn date(value: &str) -> NaiveDate {
    value.parse().unwrap()
}

/// A Toronto coach's morning grid as seen by a London talent.
#[test]
fn toronto_morning_as_seen_from_london() {
    for (slot, expected_hour) in [("09:00", 13), ("09:30", 13), ("10:00", 14)] {
        let (day, time) =
            convert_slot(slot, date("2025-03-10"), "America/Toronto", "Europe/London").unwrap();
        assert_eq!(day, date("2025-03-10"), "slot {slot} should stay on the same day");
        assert_eq!(time.hour(), expected_hour);
    }
}

/// Tokyo is far enough ahead that every Toronto afternoon slot lands on the
/// next calendar day.
#[test]
fn toronto_afternoon_lands_on_tokyo_next_day() {
    let (day, time) =
        convert_slot("15:00", date("2025-03-10"), "America/Toronto", "Asia/Tokyo").unwrap();
    assert_eq!(day, date("2025-03-11"));
    assert_eq!(time.hour(), 4);
}

/// Early-morning slots viewed from a zone further west move to the previous
/// calendar day.
#[test]
fn early_slot_moves_to_previous_day_westward() {
    let (day, time) =
        convert_slot("00:00", date("2025-06-15"), "Europe/London", "America/Vancouver").unwrap();
    assert_eq!(day, date("2025-06-14"));
    assert_eq!(time.hour(), 16);
}

/// The week where North America has switched to DST but Europe has not yet:
/// the offset between Toronto and London is four hours, not the usual five.
#[test]
fn dst_mismatch_week_uses_the_actual_offsets() {
    // 2025-03-09: Toronto springs forward. 2025-03-30: London follows.
    let (_, before) =
        convert_slot("09:00", date("2025-03-05"), "America/Toronto", "Europe/London").unwrap();
    let (_, during) =
        convert_slot("09:00", date("2025-03-15"), "America/Toronto", "Europe/London").unwrap();

    assert_eq!(before.hour(), 14);
    assert_eq!(during.hour(), 13);
}

/// A slot inside the spring-forward gap does not exist and must be
/// rejected, not silently shifted.
#[test]
fn spring_forward_gap_is_rejected() {
    let result = convert_slot("02:30", date("2025-03-09"), "America/Toronto", "UTC");
    assert!(matches!(result, Err(CoachBookError::InvalidInput(_))));
}

/// The fall-back hour happens twice; conversion resolves to the earlier
/// instant so a published slot keeps a single meaning.
#[test]
fn fall_back_ambiguity_resolves_to_the_earlier_instant() {
    // 2025-11-02 01:30 occurs at both 05:30 and 06:30 UTC in Toronto.
    let (day, time) =
        convert_slot("01:30", date("2025-11-02"), "America/Toronto", "UTC").unwrap();
    assert_eq!(day, date("2025-11-02"));
    assert_eq!(time.hour(), 5);
    assert_eq!(time.minute(), 30);
}

/// Display labels carry the zone abbreviation in effect on that date.
#[test]
fn labels_track_seasonal_abbreviations() {
    let winter = format_slot_with_zone("09:00", date("2025-01-15"), "America/Toronto").unwrap();
    let summer = format_slot_with_zone("09:00", date("2025-07-15"), "America/Toronto").unwrap();

    assert_eq!(winter, "09:00 EST");
    assert_eq!(summer, "09:00 EDT");
}

/// Round-tripping a slot through another zone and back restores the
/// original wall-clock time and date.
#[test]
fn conversion_round_trips() {
    let (there_day, there_time) =
        convert_slot("23:30", date("2025-03-10"), "America/Toronto", "Asia/Tokyo").unwrap();

    let slot = there_time.format("%H:%M").to_string();
    let (back_day, back_time) =
        convert_slot(&slot, there_day, "Asia/Tokyo", "America/Toronto").unwrap();

    assert_eq!(back_day, date("2025-03-10"));
    assert_eq!(back_time.format("%H:%M").to_string(), "23:30");
}
