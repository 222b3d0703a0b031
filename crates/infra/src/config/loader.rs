//! Configuration loader
//!
//! Loads application configuration from a config file when one is present,
//! then applies environment-variable overrides on top.
//!
//! ## Environment Variables
//! - `COACHBOOK_CONFIG`: explicit config file path
//! - `COACHBOOK_DB_PATH` / `COACHBOOK_DB_POOL_SIZE`
//! - `COACHBOOK_BIND_ADDR`
//! - `COACHBOOK_CALENDAR_API_BASE_URL` / `COACHBOOK_CALENDAR_ID`
//! - `COACHBOOK_MEET_BASE_URL` / `COACHBOOK_SIDE_EFFECT_TIMEOUT_SECS`
//! - `COACHBOOK_BREVO_BASE_URL` / `COACHBOOK_BREVO_API_KEY`
//! - `COACHBOOK_SENDER_EMAIL` / `COACHBOOK_SENDER_NAME`
//! - `COACHBOOK_EMAILJS_BASE_URL` / `COACHBOOK_EMAILJS_SERVICE_ID`
//! - `COACHBOOK_EMAILJS_TEMPLATE_ID` / `COACHBOOK_EMAILJS_USER_ID`
//!
//! ## File Locations
//! The loader probes, in order: `./coachbook.json`, `./coachbook.toml`,
//! `./config.json`, `./config.toml`. JSON and TOML are detected by file
//! extension.

use std::path::{Path, PathBuf};

use coachbook_domain::{CoachBookError, Config, Result};
use tracing::{debug, info};

/// Load configuration: file first (if any), then environment overrides.
pub fn load() -> Result<Config> {
    let mut config = match find_config_file() {
        Some(path) => {
            info!(path = %path.display(), "loading configuration file");
            load_from_file(&path)?
        }
        None => {
            debug!("no configuration file found, starting from defaults");
            Config::default()
        }
    };

    apply_overrides(&mut config, |name| std::env::var(name).ok())?;
    Ok(config)
}

/// Load configuration from a JSON or TOML file.
pub fn load_from_file(path: &Path) -> Result<Config> {
    let raw = std::fs::read_to_string(path).map_err(|err| {
        CoachBookError::Config(format!("failed to read {}: {err}", path.display()))
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&raw).map_err(|err| {
            CoachBookError::Config(format!("invalid JSON in {}: {err}", path.display()))
        }),
        Some("toml") => toml::from_str(&raw).map_err(|err| {
            CoachBookError::Config(format!("invalid TOML in {}: {err}", path.display()))
        }),
        other => Err(CoachBookError::Config(format!(
            "unsupported config extension {other:?} for {}",
            path.display()
        ))),
    }
}

fn find_config_file() -> Option<PathBuf> {
    if let Ok(explicit) = std::env::var("COACHBOOK_CONFIG") {
        return Some(PathBuf::from(explicit));
    }

    ["coachbook.json", "coachbook.toml", "config.json", "config.toml"]
        .iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.exists())
}

/// Apply overrides from a variable lookup. Split out from the process
/// environment so tests stay deterministic.
fn apply_overrides(
    config: &mut Config,
    get: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(path) = get("COACHBOOK_DB_PATH") {
        config.database.path = path;
    }
    if let Some(size) = get("COACHBOOK_DB_POOL_SIZE") {
        config.database.pool_size = size
            .parse()
            .map_err(|err| CoachBookError::Config(format!("invalid pool size: {err}")))?;
    }
    if let Some(addr) = get("COACHBOOK_BIND_ADDR") {
        config.server.bind_addr = addr;
    }

    if let Some(url) = get("COACHBOOK_CALENDAR_API_BASE_URL") {
        config.calendar.api_base_url = url;
    }
    if let Some(id) = get("COACHBOOK_CALENDAR_ID") {
        config.calendar.calendar_id = id;
    }
    if let Some(url) = get("COACHBOOK_MEET_BASE_URL") {
        config.calendar.meet_base_url = url;
    }
    if let Some(secs) = get("COACHBOOK_SIDE_EFFECT_TIMEOUT_SECS") {
        config.calendar.side_effect_timeout_secs = secs
            .parse()
            .map_err(|err| CoachBookError::Config(format!("invalid timeout: {err}")))?;
    }

    if let Some(url) = get("COACHBOOK_BREVO_BASE_URL") {
        config.notifications.brevo_base_url = url;
    }
    if let Some(key) = get("COACHBOOK_BREVO_API_KEY") {
        config.notifications.brevo_api_key = key;
    }
    if let Some(email) = get("COACHBOOK_SENDER_EMAIL") {
        config.notifications.sender_email = email;
    }
    if let Some(name) = get("COACHBOOK_SENDER_NAME") {
        config.notifications.sender_name = name;
    }
    if let Some(url) = get("COACHBOOK_EMAILJS_BASE_URL") {
        config.notifications.emailjs_base_url = url;
    }
    if let Some(id) = get("COACHBOOK_EMAILJS_SERVICE_ID") {
        config.notifications.emailjs_service_id = id;
    }
    if let Some(id) = get("COACHBOOK_EMAILJS_TEMPLATE_ID") {
        config.notifications.emailjs_template_id = id;
    }
    if let Some(id) = get("COACHBOOK_EMAILJS_USER_ID") {
        config.notifications.emailjs_user_id = id;
    }

    Ok(())
}
