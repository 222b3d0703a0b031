//! Domain constants

/// Width of a bookable slot in minutes. All published slot times sit on
/// this boundary.
pub const SLOT_INTERVAL_MINUTES: u32 = 30;

/// Default session length when a booking does not specify one.
pub const DEFAULT_SESSION_MINUTES: u32 = 30;

/// Zone used when a coach publishes availability without a timezone and no
/// earlier record exists for them.
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Calendar the engine writes events into on the provider side.
pub const PRIMARY_CALENDAR_ID: &str = "primary";

/// Storage date format for calendar dates (no time component).
pub const DATE_FORMAT: &str = "%Y-%m-%d";
