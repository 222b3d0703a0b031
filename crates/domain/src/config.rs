//! Configuration structures
//!
//! Populated by the infrastructure config loader (environment first, file
//! fallback). Defaults target local development.

use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

/// SQLite database settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: "coachbook.db".to_string(), pool_size: 4 }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind_addr: "127.0.0.1:8787".to_string() }
    }
}

/// External calendar provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Base URL of the provider event API.
    pub api_base_url: String,
    /// Calendar the engine writes into.
    pub calendar_id: String,
    /// Base URL meeting-room links are minted under.
    pub meet_base_url: String,
    /// Seconds granted to a best-effort calendar call before it is
    /// abandoned.
    pub side_effect_timeout_secs: u64,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://www.googleapis.com/calendar/v3".to_string(),
            calendar_id: crate::constants::PRIMARY_CALENDAR_ID.to_string(),
            meet_base_url: "https://meet.jit.si".to_string(),
            side_effect_timeout_secs: 10,
        }
    }
}

/// Settings for the primary and fallback notification transports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    pub brevo_base_url: String,
    pub brevo_api_key: String,
    pub sender_email: String,
    pub sender_name: String,
    pub emailjs_base_url: String,
    pub emailjs_service_id: String,
    pub emailjs_template_id: String,
    pub emailjs_user_id: String,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            brevo_base_url: "https://api.brevo.com".to_string(),
            brevo_api_key: String::new(),
            sender_email: "no-reply@coachbook.app".to_string(),
            sender_name: "CoachBook".to_string(),
            emailjs_base_url: "https://api.emailjs.com".to_string(),
            emailjs_service_id: String::new(),
            emailjs_template_id: String::new(),
            emailjs_user_id: String::new(),
        }
    }
}
