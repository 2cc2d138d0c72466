//! Appointment endpoints.
//!
//! - `GET /api/appointments?tab=upcoming|completed`: cards for one tab

use axum::extract::Query;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::appointment::{self, AppointmentCard, AppointmentTab};

#[derive(Deserialize)]
pub struct AppointmentsQuery {
    #[serde(default)]
    pub tab: AppointmentTab,
}

#[derive(Serialize)]
pub struct AppointmentsResponse {
    pub tab: AppointmentTab,
    pub appointments: Vec<AppointmentCard>,
}

/// `GET /api/appointments`: defaults to the upcoming tab.
pub async fn list(Query(query): Query<AppointmentsQuery>) -> Json<AppointmentsResponse> {
    Json(AppointmentsResponse {
        tab: query.tab,
        appointments: appointment::cards_for_tab(query.tab),
    })
}
