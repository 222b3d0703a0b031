//! HTTP routes
//!
//! Thin handlers over the scheduling service; all policy lives in the core
//! crate. One module per resource.

pub mod appointments;
pub mod availability;
pub mod calendar;
pub mod profiles;
pub mod timezone;

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{delete, get, patch, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::context::AppContext;
use crate::error::ApiResult;

/// Build the application router.
pub fn router(context: Arc<AppContext>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/coaches/{coach_id}/availability",
            put(availability::save).get(availability::published),
        )
        .route("/coaches/{coach_id}/slots", get(availability::open_slots))
        .route("/coaches/{coach_id}/slots/check", get(availability::check_slot))
        .route("/appointments", post(appointments::book).get(appointments::list))
        .route("/appointments/{id}/status", patch(appointments::update_status))
        .route("/appointments/{id}", delete(appointments::remove))
        .route("/coaches/{coach_id}/calendar/sync", post(calendar::sync_all))
        .route("/calendar/events", get(calendar::events))
        .route(
            "/calendar/credentials",
            put(calendar::store_credentials).delete(calendar::clear_credentials),
        )
        .route("/timezone/convert", get(timezone::convert))
        .route("/profiles/{user_id}/{role}", put(profiles::upsert))
        .with_state(context)
}

async fn health(State(context): State<Arc<AppContext>>) -> ApiResult<Json<Value>> {
    context.db.health_check()?;
    Ok(Json(json!({ "status": "ok" })))
}
