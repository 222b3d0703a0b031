//! Profile seeding endpoint
//!
//! Profiles belong to the wider application; this endpoint lets it push
//! the contact details the engine needs for notifications.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use coachbook_domain::{Profile, Role};
use serde::Deserialize;

use crate::context::AppContext;
use crate::error::ApiResult;

#[derive(Debug, Deserialize)]
pub struct ProfileBody {
    pub email: String,
    pub display_name: String,
}

pub async fn upsert(
    State(context): State<Arc<AppContext>>,
    Path((user_id, role)): Path<(String, String)>,
    Json(body): Json<ProfileBody>,
) -> ApiResult<StatusCode> {
    let role = Role::parse(&role)?;
    let profile = Profile { email: body.email, display_name: body.display_name };
    context.profiles.upsert(&user_id, role, &profile)?;
    Ok(StatusCode::NO_CONTENT)
}
