//! Pharmacy endpoints.
//!
//! - `GET /api/pharmacy?tab=nearby|search&q=`: content of one tab
//! - `GET /api/pharmacy/nearby`: pharmacies near the user
//! - `GET /api/pharmacy/medicines?q=`: medicine search
//! - `GET /api/pharmacy/cart` / `POST /api/pharmacy/cart`: cart count / add item

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{Medicine, Pharmacy};
use crate::pharmacy::{self, PharmacyScreen, PharmacyTab};

#[derive(Deserialize)]
pub struct ScreenQuery {
    #[serde(default)]
    pub tab: PharmacyTab,
    #[serde(default)]
    pub q: String,
}

/// `GET /api/pharmacy`
pub async fn screen(Query(query): Query<ScreenQuery>) -> Json<PharmacyScreen> {
    Json(pharmacy::screen(query.tab, &query.q))
}

/// `GET /api/pharmacy/nearby`
pub async fn nearby() -> Json<Vec<Pharmacy>> {
    Json(pharmacy::nearby_pharmacies())
}

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// `GET /api/pharmacy/medicines`
pub async fn medicines(Query(query): Query<SearchQuery>) -> Json<Vec<Medicine>> {
    Json(pharmacy::search_medicines(&query.q))
}

#[derive(Serialize)]
pub struct CartResponse {
    pub count: u32,
}

/// `GET /api/pharmacy/cart`
pub async fn cart(State(ctx): State<ApiContext>) -> Result<Json<CartResponse>, ApiError> {
    Ok(Json(CartResponse {
        count: ctx.core.cart_count()?,
    }))
}

#[derive(Deserialize)]
pub struct AddToCartRequest {
    pub medicine_id: String,
}

/// `POST /api/pharmacy/cart`: 409 when the medicine is out of stock.
pub async fn add_to_cart(
    State(ctx): State<ApiContext>,
    Json(req): Json<AddToCartRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    Ok(Json(CartResponse {
        count: ctx.core.add_to_cart(&req.medicine_id)?,
    }))
}
