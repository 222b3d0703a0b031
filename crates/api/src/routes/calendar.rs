//! Calendar synchronization and credential endpoints
//!
//! The credential routes stand in for the OAuth session the wider
//! application manages: the UI hands the engine a fresh access token, and
//! clears it on logout.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use coachbook_core::{CalendarBridge, SyncReport};
use coachbook_domain::CalendarEvent;
use serde::Deserialize;

use crate::context::AppContext;
use crate::error::ApiResult;

#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CredentialsBody {
    pub access_token: String,
}

/// Mirror all confirmed appointments of a coach; per-item failures are
/// reported in the body, never as a batch failure.
pub async fn sync_all(
    State(context): State<Arc<AppContext>>,
    Path(coach_id): Path<String>,
) -> ApiResult<Json<SyncReport>> {
    let report = context.scheduling.sync_all(&coach_id).await?;
    Ok(Json(report))
}

/// Provider events inside a window, for calendar-grid display. An expired
/// session surfaces as 401, distinct from an empty list.
pub async fn events(
    State(context): State<Arc<AppContext>>,
    Query(query): Query<EventsQuery>,
) -> ApiResult<Json<Vec<CalendarEvent>>> {
    let events = context.calendar.events_between(query.start, query.end).await?;
    Ok(Json(events))
}

/// Store a fresh provider access token.
pub async fn store_credentials(
    State(context): State<Arc<AppContext>>,
    Json(body): Json<CredentialsBody>,
) -> StatusCode {
    context.credentials.set_token(body.access_token);
    StatusCode::NO_CONTENT
}

/// Drop the stored provider credential.
pub async fn clear_credentials(State(context): State<Arc<AppContext>>) -> StatusCode {
    context.credentials.clear();
    StatusCode::NO_CONTENT
}
