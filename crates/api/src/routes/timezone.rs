//! Display-only timezone conversion endpoint
//!
//! Stored slot times never change zone; this endpoint converts for
//! presentation. The converted calendar date is reported because a slot
//! near midnight can land on the adjacent day in the viewer's zone.

use axum::extract::Query;
use axum::Json;
use chrono::NaiveDate;
use coachbook_domain::utils::timezone::{convert_slot, format_slot_with_zone};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;

#[derive(Debug, Deserialize)]
pub struct ConvertQuery {
    pub time: String,
    pub date: NaiveDate,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub date: NaiveDate,
    pub time: String,
    pub label: String,
}

pub async fn convert(Query(query): Query<ConvertQuery>) -> ApiResult<Json<ConvertResponse>> {
    let (date, time) = convert_slot(&query.time, query.date, &query.from, &query.to)?;
    let time = time.format("%H:%M").to_string();
    let label = format_slot_with_zone(&time, date, &query.to)?;

    Ok(Json(ConvertResponse { date, time, label }))
}
