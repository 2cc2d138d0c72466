//! API endpoint handlers.
//!
//! Each module corresponds to a screen of the mobile app.
//! Handlers stay thin and call into the domain modules.

pub mod appointments;
pub mod auth;
pub mod chat;
pub mod emergency;
pub mod health;
pub mod home;
pub mod pharmacy;
