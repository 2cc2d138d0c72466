//! HTTP router for the mobile front-end.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`.
//!
//! Layer order (outermost → innermost): CORS → Extension → Audit → Handler

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the API router.
///
/// Middleware uses `Extension<ApiContext>` (injected outside the audit layer).
/// Endpoint handlers use `State<ApiContext>` (provided via `with_state`).
pub fn api_router(core: Arc<CoreState>) -> Router {
    let ctx = ApiContext::new(core);

    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/home", get(endpoints::home::dashboard))
        .route("/home/tasks/:id/toggle", post(endpoints::home::toggle_task))
        .route("/chat/messages", get(endpoints::chat::messages))
        .route("/chat/send", post(endpoints::chat::send))
        .route("/chat/abandon", post(endpoints::chat::abandon))
        .route("/chat/classify", post(endpoints::chat::classify))
        .route("/chat/quick-questions", get(endpoints::chat::quick_questions))
        .route("/emergency", get(endpoints::emergency::status))
        .route("/emergency/request", post(endpoints::emergency::request))
        .route("/emergency/confirm", post(endpoints::emergency::confirm))
        .route("/emergency/cancel", post(endpoints::emergency::cancel))
        .route("/emergency/dial-now", post(endpoints::emergency::dial_now))
        .route("/emergency/contacts", get(endpoints::emergency::contacts))
        .route(
            "/emergency/contacts/:id/call",
            post(endpoints::emergency::call_contact),
        )
        .route(
            "/emergency/danger-signs",
            get(endpoints::emergency::danger_signs),
        )
        .route("/appointments", get(endpoints::appointments::list))
        .route("/pharmacy", get(endpoints::pharmacy::screen))
        .route("/pharmacy/nearby", get(endpoints::pharmacy::nearby))
        .route("/pharmacy/medicines", get(endpoints::pharmacy::medicines))
        .route(
            "/pharmacy/cart",
            get(endpoints::pharmacy::cart).post(endpoints::pharmacy::add_to_cart),
        )
        .route("/auth/roles", get(endpoints::auth::roles))
        .route("/auth/role", post(endpoints::auth::select_role))
        .route("/auth/role-title", get(endpoints::auth::role_title))
        .route("/auth/login", post(endpoints::auth::login))
        .route("/auth/register", post(endpoints::auth::register))
        .with_state(ctx.clone())
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
        // Extension must sit outside the audit layer so it can extract ApiContext
        .layer(axum::Extension(ctx));

    Router::new()
        .nest("/api", routes)
        .layer(CorsLayer::permissive())
}
