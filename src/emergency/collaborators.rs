//! Boundary collaborators for the SOS flow: telephony and location.
//!
//! Neither exists on the companion backend. The stubs log what a real
//! device would do so the flow can be exercised end to end.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::config;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DialError {
    #[error("No telephony capability on this device")]
    Unavailable,
    #[error("Dial rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("Location services unavailable")]
    Unavailable,
    #[error("Location lookup failed: {0}")]
    Failed(String),
}

/// Places a phone call. Must return quickly; failure is reported, never raised.
pub trait Dialer: Send + Sync {
    fn dial(&self, number: &str) -> Result<(), DialError>;
}

/// Resolves a human-readable description of where the user is.
pub trait LocationProvider: Send + Sync {
    fn current_location(&self) -> Result<String, LocationError>;
}

/// Records dial requests as `tel:` URIs and logs them.
#[derive(Debug, Default)]
pub struct LoggingDialer {
    placed: Mutex<Vec<String>>,
}

impl LoggingDialer {
    pub fn new() -> Self {
        Self::default()
    }

    /// URIs dialed so far, oldest first.
    pub fn placed(&self) -> Vec<String> {
        self.placed
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl Dialer for LoggingDialer {
    fn dial(&self, number: &str) -> Result<(), DialError> {
        let uri = tel_uri(number);
        tracing::info!(%uri, "Dial requested");
        self.placed
            .lock()
            .map_err(|_| DialError::Rejected("dial log poisoned".into()))?
            .push(uri);
        Ok(())
    }
}

/// Dialer for hosts without telephony. Every call fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableDialer;

impl Dialer for UnavailableDialer {
    fn dial(&self, number: &str) -> Result<(), DialError> {
        tracing::warn!(number, "Dial requested but telephony is unavailable");
        Err(DialError::Unavailable)
    }
}

/// Location provider returning a fixed description.
#[derive(Debug, Clone)]
pub struct FixedLocationProvider {
    location: String,
}

impl FixedLocationProvider {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

impl Default for FixedLocationProvider {
    fn default() -> Self {
        Self::new("University of Ghana, Legon - GPS: 5.6470° N, 0.1890° W")
    }
}

impl LocationProvider for FixedLocationProvider {
    fn current_location(&self) -> Result<String, LocationError> {
        Ok(self.location.clone())
    }
}

/// Location provider for hosts without location services.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableLocation;

impl LocationProvider for UnavailableLocation {
    fn current_location(&self) -> Result<String, LocationError> {
        Err(LocationError::Unavailable)
    }
}

/// Run `dialer` so that a panicking implementation reports a failed dial
/// instead of unwinding through the caller's lock.
pub fn dial_isolated(dialer: &dyn Dialer, number: &str) -> Result<(), DialError> {
    panic::catch_unwind(AssertUnwindSafe(|| dialer.dial(number))).unwrap_or_else(|_| {
        tracing::error!(number, "Dialer panicked");
        Err(DialError::Rejected("dialer panicked".into()))
    })
}

/// `tel:` URI for a display-formatted number ("+233 30 2684000" → "tel:+233302684000").
pub fn tel_uri(number: &str) -> String {
    let digits: String = number
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    format!("tel:{digits}")
}

/// Best-effort location lookup bounded by `timeout`.
///
/// The provider runs on the blocking pool. Errors, panics and timeouts
/// all resolve to [`config::LOCATION_PLACEHOLDER`].
pub async fn resolve_location(provider: Arc<dyn LocationProvider>, timeout: Duration) -> String {
    let lookup = tokio::task::spawn_blocking(move || provider.current_location());

    match tokio::time::timeout(timeout, lookup).await {
        Ok(Ok(Ok(location))) => location,
        Ok(Ok(Err(e))) => {
            tracing::warn!(error = %e, "Location lookup failed, using placeholder");
            config::LOCATION_PLACEHOLDER.to_string()
        }
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Location task aborted, using placeholder");
            config::LOCATION_PLACEHOLDER.to_string()
        }
        Err(_) => {
            tracing::warn!(timeout_ms = timeout.as_millis() as u64, "Location lookup timed out");
            config::LOCATION_PLACEHOLDER.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SlowLocation;

    impl LocationProvider for SlowLocation {
        fn current_location(&self) -> Result<String, LocationError> {
            std::thread::sleep(Duration::from_millis(300));
            Ok("too late".into())
        }
    }

    #[test]
    fn tel_uri_strips_formatting() {
        assert_eq!(tel_uri("112"), "tel:112");
        assert_eq!(tel_uri("+233 30 2684000"), "tel:+233302684000");
    }

    #[test]
    fn logging_dialer_records_calls() {
        let dialer = LoggingDialer::new();
        dialer.dial("112").unwrap();
        dialer.dial("+233 20 123 4567").unwrap();
        assert_eq!(dialer.placed(), vec!["tel:112", "tel:+233201234567"]);
    }

    struct PanickingDialer;

    impl Dialer for PanickingDialer {
        fn dial(&self, _number: &str) -> Result<(), DialError> {
            panic!("modem gone");
        }
    }

    #[test]
    fn dial_isolated_turns_panic_into_error() {
        let err = dial_isolated(&PanickingDialer, "112").unwrap_err();
        assert_eq!(err, DialError::Rejected("dialer panicked".into()));
        assert!(dial_isolated(&LoggingDialer::new(), "112").is_ok());
    }

    #[test]
    fn unavailable_dialer_fails() {
        assert_eq!(UnavailableDialer.dial("112"), Err(DialError::Unavailable));
    }

    #[tokio::test]
    async fn resolve_returns_provider_location() {
        let provider: Arc<dyn LocationProvider> = Arc::new(FixedLocationProvider::new("Accra"));
        let loc = resolve_location(provider, Duration::from_secs(1)).await;
        assert_eq!(loc, "Accra");
    }

    #[tokio::test]
    async fn resolve_falls_back_on_error() {
        let provider: Arc<dyn LocationProvider> = Arc::new(UnavailableLocation);
        let loc = resolve_location(provider, Duration::from_secs(1)).await;
        assert_eq!(loc, config::LOCATION_PLACEHOLDER);
    }

    #[tokio::test]
    async fn resolve_falls_back_on_timeout() {
        let provider: Arc<dyn LocationProvider> = Arc::new(SlowLocation);
        let loc = resolve_location(provider, Duration::from_millis(20)).await;
        assert_eq!(loc, config::LOCATION_PLACEHOLDER);
    }
}
