pub mod api; // Local HTTP API for the mobile front-end
pub mod appointment;
pub mod auth; // Onboarding + simulated sign-in
pub mod chat; // Triage chat session
pub mod config;
pub mod core_state; // Transport-agnostic state
pub mod emergency; // SOS escalation
pub mod home;
pub mod models;
pub mod pharmacy;
pub mod triage;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Start the backend and serve until Ctrl-C.
pub async fn run() -> Result<(), api::ApiServerError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let core = Arc::new(core_state::CoreState::new());
    let server = api::start_api_server(core.clone(), config::api_bind_addr()).await?;
    tracing::info!(addr = %server.session.server_addr, "Listening");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }

    // An armed countdown must not dial after the user quit the app.
    if let Err(e) = core.emergency().cancel() {
        tracing::warn!("Could not cancel SOS on shutdown: {e}");
    }
    server.stop().await;
    tracing::info!("{} stopped", config::APP_NAME);
    Ok(())
}
