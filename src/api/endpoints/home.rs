//! Home dashboard endpoints.
//!
//! - `GET /api/home`: greeting, pregnancy progress, metrics, tasks
//! - `POST /api/home/tasks/:id/toggle`: flip a task's completion

use axum::extract::{Path, State};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::home::HomeView;
use crate::models::Task;

/// `GET /api/home`
pub async fn dashboard(State(ctx): State<ApiContext>) -> Result<Json<HomeView>, ApiError> {
    Ok(Json(ctx.core.home_view()?))
}

/// `POST /api/home/tasks/:id/toggle`
pub async fn toggle_task(
    State(ctx): State<ApiContext>,
    Path(task_id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    Ok(Json(ctx.core.toggle_task(&task_id)?))
}
