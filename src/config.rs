use std::net::SocketAddr;

/// Application-level constants
pub const APP_NAME: &str = "Nurture";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// SOS grace period before the emergency number is dialed.
/// Not configurable at runtime.
pub const SOS_COUNTDOWN_SECS: u32 = 5;

/// Number dialed when the SOS countdown completes.
pub const EMERGENCY_NUMBER: &str = "112";

/// Artificial "thinking" delay before the assistant replies.
pub const CHAT_RESPONSE_DELAY_MS: u64 = 1500;

/// Simulated round-trip for login / registration.
pub const AUTH_SIMULATION_DELAY_MS: u64 = 2000;

/// Upper bound on how long SOS confirmation waits for a location fix.
pub const LOCATION_TIMEOUT_MS: u64 = 2000;

/// Shown in the SOS session when no location could be resolved.
pub const LOCATION_PLACEHOLDER: &str = "Location unavailable";

/// Environment variable overriding the API bind address.
pub const API_ADDR_ENV: &str = "NURTURE_API_ADDR";

const DEFAULT_API_ADDR: &str = "127.0.0.1:8787";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "nurture=info,nurture_lib=info,tower_http=warn"
}

/// Address the local API binds to.
/// Falls back to the default when the variable is unset or unparsable.
pub fn api_bind_addr() -> SocketAddr {
    parse_bind_addr(std::env::var(API_ADDR_ENV).ok().as_deref())
}

fn parse_bind_addr(raw: Option<&str>) -> SocketAddr {
    let fallback: SocketAddr = SocketAddr::from(([127, 0, 0, 1], 8787));
    match raw {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(value, "Invalid {API_ADDR_ENV}, using {DEFAULT_API_ADDR}");
            fallback
        }),
        None => fallback,
    }
}
