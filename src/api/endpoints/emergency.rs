//! Emergency SOS endpoints.
//!
//! The flow is `request` → `confirm` → (countdown) → dial, with `cancel`
//! and `dial-now` available while armed. Every call returns the current
//! snapshot so the screen can re-render from one response.

use axum::extract::{Path, State};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::emergency::{directory, DialRecord, EmergencySnapshot};
use crate::models::EmergencyContact;

/// `GET /api/emergency`
pub async fn status(State(ctx): State<ApiContext>) -> Result<Json<EmergencySnapshot>, ApiError> {
    Ok(Json(ctx.core.emergency().snapshot()?))
}

/// `POST /api/emergency/request`: SOS pressed, confirmation pending.
pub async fn request(State(ctx): State<ApiContext>) -> Result<Json<EmergencySnapshot>, ApiError> {
    Ok(Json(ctx.core.emergency().request()?))
}

/// `POST /api/emergency/confirm`: start the countdown.
pub async fn confirm(State(ctx): State<ApiContext>) -> Result<Json<EmergencySnapshot>, ApiError> {
    Ok(Json(ctx.core.emergency().confirm().await?))
}

/// `POST /api/emergency/cancel`
pub async fn cancel(State(ctx): State<ApiContext>) -> Result<Json<EmergencySnapshot>, ApiError> {
    Ok(Json(ctx.core.emergency().cancel()?))
}

/// `POST /api/emergency/dial-now`: skip the rest of the countdown.
pub async fn dial_now(State(ctx): State<ApiContext>) -> Result<Json<EmergencySnapshot>, ApiError> {
    Ok(Json(ctx.core.emergency().dial_now()?))
}

/// `GET /api/emergency/contacts`
pub async fn contacts() -> Json<Vec<EmergencyContact>> {
    Json(directory::contacts())
}

/// `POST /api/emergency/contacts/:id/call`
pub async fn call_contact(
    State(ctx): State<ApiContext>,
    Path(contact_id): Path<String>,
) -> Result<Json<DialRecord>, ApiError> {
    Ok(Json(ctx.core.emergency().call_contact(&contact_id)?))
}

/// `GET /api/emergency/danger-signs`
pub async fn danger_signs() -> Json<&'static [&'static str]> {
    Json(directory::DANGER_SIGNS)
}
