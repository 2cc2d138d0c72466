//! Plain data structs shared by the screen modules and the API.
//!
//! Everything here is display data. Seeded values live with the module
//! that owns them (`emergency::directory`, `appointment`, `pharmacy`, `home`).

pub mod appointment;
pub mod emergency;
pub mod enums;
pub mod home;
pub mod message;
pub mod pharmacy;

pub use appointment::Appointment;
pub use emergency::{EmergencyContact, EmergencySession};
pub use enums::*;
pub use home::{HealthMetric, Task};
pub use message::Message;
pub use pharmacy::{Medicine, Pharmacy};

/// Errors raised while converting raw strings into model values.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Invalid value '{value}' for {field}")]
    InvalidEnum { field: String, value: String },
}
