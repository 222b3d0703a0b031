//! Cached provider credential
//!
//! The wider application owns the OAuth flow; the engine only needs the
//! resulting access token. The store keeps it in memory, hands it to the
//! client per request, and is cleared when the provider reports the
//! session expired so the next caller gets a typed auth error instead of a
//! crash.

use std::sync::Mutex;

use coachbook_domain::{CoachBookError, Result};
use tracing::info;

/// Process-wide cached calendar credential.
#[derive(Default)]
pub struct CalendarCredentials {
    token: Mutex<Option<String>>,
}

impl CalendarCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a fresh access token.
    pub fn set_token(&self, token: impl Into<String>) {
        let mut guard = self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(token.into());
        info!("calendar credential stored");
    }

    /// Drop the cached token, e.g. after the provider rejected it.
    pub fn clear(&self) {
        let mut guard = self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if guard.take().is_some() {
            info!("calendar credential cleared");
        }
    }

    /// Whether a credential is currently stored.
    pub fn is_authenticated(&self) -> bool {
        self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).is_some()
    }

    /// The bearer token, or a typed not-authenticated error.
    pub fn bearer_token(&self) -> Result<String> {
        self.token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
            .ok_or_else(|| {
                CoachBookError::Auth("calendar session not authenticated".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_token_is_an_auth_error() {
        let credentials = CalendarCredentials::new();
        assert!(!credentials.is_authenticated());
        assert!(matches!(credentials.bearer_token(), Err(CoachBookError::Auth(_))));
    }

    #[test]
    fn set_and_clear_round_trip() {
        let credentials = CalendarCredentials::new();
        credentials.set_token("tok-1");
        assert_eq!(credentials.bearer_token().unwrap(), "tok-1");

        credentials.clear();
        assert!(credentials.bearer_token().is_err());
    }
}
