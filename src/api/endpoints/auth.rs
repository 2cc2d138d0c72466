//! Onboarding and authentication endpoints.
//!
//! - `GET /api/auth/roles`: role cards
//! - `POST /api/auth/role`: continue from role selection
//! - `GET /api/auth/role-title?role=`: registration heading
//! - `POST /api/auth/login` / `POST /api/auth/register`: simulated sign-in

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::auth::{self, AuthSession, LoginForm, RegistrationForm, RegistrationParams, RoleOption};
use crate::models::UserRole;

/// `GET /api/auth/roles`
pub async fn roles() -> Json<Vec<RoleOption>> {
    Json(auth::role_options())
}

#[derive(Deserialize)]
pub struct RoleSelection {
    #[serde(default)]
    pub role: Option<UserRole>,
}

/// `POST /api/auth/role`: 400 without a selection.
pub async fn select_role(Json(req): Json<RoleSelection>) -> Result<Json<RegistrationParams>, ApiError> {
    Ok(Json(auth::continue_with_role(req.role)?))
}

#[derive(Deserialize)]
pub struct RoleTitleQuery {
    pub role: Option<String>,
}

#[derive(Serialize)]
pub struct RoleTitleResponse {
    pub title: &'static str,
}

/// `GET /api/auth/role-title`
pub async fn role_title(Query(query): Query<RoleTitleQuery>) -> Json<RoleTitleResponse> {
    Json(RoleTitleResponse {
        title: auth::role_title(query.role.as_deref()),
    })
}

/// `POST /api/auth/login`
pub async fn login(
    State(ctx): State<ApiContext>,
    Json(form): Json<LoginForm>,
) -> Result<Json<AuthSession>, ApiError> {
    Ok(Json(auth::sign_in(&form, ctx.core.auth_delay).await?))
}

/// `POST /api/auth/register`
pub async fn register(
    State(ctx): State<ApiContext>,
    Json(form): Json<RegistrationForm>,
) -> Result<Json<AuthSession>, ApiError> {
    Ok(Json(auth::register(&form, ctx.core.auth_delay).await?))
}
