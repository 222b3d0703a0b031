//! Appointment lifecycle endpoints

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use coachbook_core::AppointmentView;
use coachbook_domain::{Appointment, AppointmentStatus, BookingRequest, CoachBookError};
use serde::Deserialize;

use crate::context::AppContext;
use crate::error::ApiResult;

#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status: AppointmentStatus,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub coach_id: Option<String>,
    #[serde(default)]
    pub talent_id: Option<String>,
    #[serde(default)]
    pub view: Option<String>,
}

/// Book a slot. Conflicts surface as 409 naming the holding talent.
pub async fn book(
    State(context): State<Arc<AppContext>>,
    Json(request): Json<BookingRequest>,
) -> ApiResult<(StatusCode, Json<Appointment>)> {
    let appointment = context.scheduling.book(request).await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

/// List appointments for exactly one party, optionally filtered to the
/// derived upcoming/past views.
pub async fn list(
    State(context): State<Arc<AppContext>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Appointment>>> {
    let view = match query.view.as_deref() {
        Some(raw) => AppointmentView::parse(raw)?,
        None => AppointmentView::All,
    };
    let today = Utc::now().date_naive();

    let appointments = match (query.coach_id, query.talent_id) {
        (Some(coach_id), None) => {
            context.scheduling.appointments_for_coach(&coach_id, view, today).await?
        }
        (None, Some(talent_id)) => {
            context.scheduling.appointments_for_talent(&talent_id, view, today).await?
        }
        _ => {
            return Err(CoachBookError::InvalidInput(
                "provide exactly one of coach_id or talent_id".to_string(),
            )
            .into())
        }
    };

    Ok(Json(appointments))
}

/// Confirm or cancel an appointment.
pub async fn update_status(
    State(context): State<Arc<AppContext>>,
    Path(id): Path<String>,
    Json(body): Json<StatusBody>,
) -> ApiResult<Json<Appointment>> {
    let appointment = context.scheduling.update_status(&id, body.status).await?;
    Ok(Json(appointment))
}

/// Hard delete. Administrative path, unused by the booking flow.
pub async fn remove(
    State(context): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    context.scheduling.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
