//! Availability publication and slot resolution endpoints

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use coachbook_domain::Availability;
use serde::{Deserialize, Serialize};

use crate::context::AppContext;
use crate::error::ApiResult;

#[derive(Debug, Deserialize)]
pub struct SaveAvailabilityBody {
    pub date: NaiveDate,
    pub time_slots: Vec<String>,
    #[serde(default)]
    pub timezone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct SlotQuery {
    pub date: NaiveDate,
    pub time: String,
}

#[derive(Debug, Serialize)]
pub struct SlotsResponse {
    pub date: NaiveDate,
    pub slots: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SlotCheckResponse {
    pub date: NaiveDate,
    pub time: String,
    pub available: bool,
}

/// Full replace of a coach's published slot set for one date.
pub async fn save(
    State(context): State<Arc<AppContext>>,
    Path(coach_id): Path<String>,
    Json(body): Json<SaveAvailabilityBody>,
) -> ApiResult<Json<Availability>> {
    let availability = context
        .scheduling
        .save_availability(&coach_id, body.date, &body.time_slots, body.timezone)
        .await?;
    Ok(Json(availability))
}

/// Published slots, regardless of bookings.
pub async fn published(
    State(context): State<Arc<AppContext>>,
    Path(coach_id): Path<String>,
    Query(query): Query<DateQuery>,
) -> ApiResult<Json<SlotsResponse>> {
    let slots = context.scheduling.get_availability(&coach_id, query.date).await?;
    Ok(Json(SlotsResponse { date: query.date, slots }))
}

/// Bookable slots: published minus active bookings. The only endpoint the
/// booking UI may trust for "is this slot open" display.
pub async fn open_slots(
    State(context): State<Arc<AppContext>>,
    Path(coach_id): Path<String>,
    Query(query): Query<DateQuery>,
) -> ApiResult<Json<SlotsResponse>> {
    let slots = context.scheduling.available_slots(&coach_id, query.date).await?;
    Ok(Json(SlotsResponse { date: query.date, slots }))
}

/// Advisory single-slot check used before the booking-reason step.
pub async fn check_slot(
    State(context): State<Arc<AppContext>>,
    Path(coach_id): Path<String>,
    Query(query): Query<SlotQuery>,
) -> ApiResult<Json<SlotCheckResponse>> {
    let available =
        context.scheduling.is_slot_available(&coach_id, query.date, &query.time).await?;
    Ok(Json(SlotCheckResponse { date: query.date, time: query.time, available }))
}
