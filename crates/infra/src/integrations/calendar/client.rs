//! Google Calendar HTTP client
//!
//! Thin CRUD over the Calendar v3 events API. The base URL is injectable
//! so tests can point the client at a local mock server.

use std::sync::Arc;

use coachbook_domain::{CalendarConfig, CoachBookError, Result};
use reqwest::{Client, Response, StatusCode};
use tracing::debug;

use super::credentials::CalendarCredentials;
use super::types::{GoogleEvent, GoogleEventPatch, GoogleEventRequest, GoogleEventsResponse};
use crate::errors::InfraError;

/// Google Calendar API client.
#[derive(Clone)]
pub struct GoogleCalendarClient {
    http: Client,
    base_url: String,
    calendar_id: String,
    credentials: Arc<CalendarCredentials>,
}

impl GoogleCalendarClient {
    /// Create a new client against the configured API base.
    pub fn new(config: &CalendarConfig, credentials: Arc<CalendarCredentials>) -> Self {
        Self {
            http: Client::new(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            calendar_id: config.calendar_id.clone(),
            credentials,
        }
    }

    /// Shared handle to the credential store.
    pub fn credentials(&self) -> Arc<CalendarCredentials> {
        self.credentials.clone()
    }

    /// `events.insert` against the configured calendar.
    pub async fn insert_event(&self, request: &GoogleEventRequest) -> Result<GoogleEvent> {
        let token = self.credentials.bearer_token()?;

        debug!(calendar_id = %self.calendar_id, summary = %request.summary, "creating event");

        let response = self
            .http
            .post(self.events_url())
            .bearer_auth(token)
            .json(request)
            .send()
            .await
            .map_err(InfraError::from)?;

        self.parse_event(self.check(response).await?).await
    }

    /// `events.patch`: partial-field merge, only fields in the patch are
    /// sent.
    pub async fn patch_event(
        &self,
        event_id: &str,
        patch: &GoogleEventPatch,
    ) -> Result<GoogleEvent> {
        let token = self.credentials.bearer_token()?;

        let response = self
            .http
            .patch(format!("{}/{event_id}", self.events_url()))
            .bearer_auth(token)
            .json(patch)
            .send()
            .await
            .map_err(InfraError::from)?;

        self.parse_event(self.check(response).await?).await
    }

    /// `events.delete`.
    pub async fn delete_event(&self, event_id: &str) -> Result<()> {
        let token = self.credentials.bearer_token()?;

        let response = self
            .http
            .delete(format!("{}/{event_id}", self.events_url()))
            .bearer_auth(token)
            .send()
            .await
            .map_err(InfraError::from)?;

        self.check(response).await?;
        Ok(())
    }

    /// `events.list` within a window, expanded to single events in start
    /// order.
    pub async fn list_events(&self, time_min: &str, time_max: &str) -> Result<Vec<GoogleEvent>> {
        let token = self.credentials.bearer_token()?;

        let response = self
            .http
            .get(self.events_url())
            .bearer_auth(token)
            .query(&[
                ("singleEvents", "true"),
                ("orderBy", "startTime"),
                ("timeMin", time_min),
                ("timeMax", time_max),
            ])
            .send()
            .await
            .map_err(InfraError::from)?;

        let response = self.check(response).await?;
        let events: GoogleEventsResponse = response.json().await.map_err(|err| {
            CoachBookError::InvalidInput(format!("Failed to parse Google response: {err}"))
        })?;
        Ok(events.items)
    }

    fn events_url(&self) -> String {
        format!("{}/calendars/{}/events", self.base_url, self.calendar_id)
    }

    /// Map provider failures: an expired session clears the cached
    /// credential and surfaces as an auth error distinct from "no events".
    async fn check(&self, response: Response) -> Result<Response> {
        if response.status() == StatusCode::UNAUTHORIZED {
            self.credentials.clear();
            return Err(CoachBookError::Auth("calendar session expired".to_string()));
        }

        if !response.status().is_success() {
            let status = response.status();
            let error_text =
                response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CoachBookError::Network(format!(
                "Google API error ({status}): {error_text}"
            )));
        }

        Ok(response)
    }

    async fn parse_event(&self, response: Response) -> Result<GoogleEvent> {
        response.json().await.map_err(|err| {
            CoachBookError::InvalidInput(format!("Failed to parse Google response: {err}"))
        })
    }
}
