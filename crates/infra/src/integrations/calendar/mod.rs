//! Google Calendar integration
//!
//! The bridge mirrors confirmed appointments into the provider calendar
//! and reads events back for grid display. All calls require a stored
//! credential; an expired session clears the credential and surfaces a
//! typed auth error so callers can prompt re-authentication.

pub mod bridge;
pub mod client;
pub mod credentials;
pub mod types;

pub use bridge::GoogleCalendarBridge;
pub use client::GoogleCalendarClient;
pub use credentials::CalendarCredentials;
