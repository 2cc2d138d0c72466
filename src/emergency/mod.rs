//! Emergency SOS: confirm, count down, dial.
//!
//! - `controller`: synchronous state machine
//! - `countdown`: tokio task delivering one tick per second
//! - `service`: single owner of controller + driver, used by the API
//! - `collaborators`: `Dialer` / `LocationProvider` seams and stubs
//! - `directory`: emergency contacts and danger signs

pub mod collaborators;
pub mod controller;
pub mod countdown;
pub mod directory;
pub mod service;

pub use collaborators::{
    DialError, Dialer, FixedLocationProvider, LocationError, LocationProvider, LoggingDialer,
    UnavailableDialer, UnavailableLocation,
};
pub use controller::{
    DialRecord, EmergencyController, EmergencySnapshot, EscalationState, TickOutcome,
};
pub use service::EmergencyService;

#[derive(Debug, thiserror::Error)]
pub enum EmergencyError {
    #[error("Unknown emergency contact: {0}")]
    ContactNotFound(String),
}
