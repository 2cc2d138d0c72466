//! Owner of the single SOS flow.
//!
//! Wraps the controller with its countdown driver and collaborators.
//! Lock order: controller, then countdown handle. A poisoned lock is
//! recovered, as the countdown driver does, so the SOS flow stays usable.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;

use super::collaborators::{
    dial_isolated, resolve_location, Dialer, FixedLocationProvider, LocationProvider, LoggingDialer,
};
use super::controller::{DialRecord, EmergencyController, EmergencySnapshot};
use super::countdown::spawn_countdown;
use super::directory;
use super::EmergencyError;
use crate::config;

pub struct EmergencyService {
    controller: Arc<Mutex<EmergencyController>>,
    countdown: Mutex<Option<JoinHandle<()>>>,
    dialer: Arc<dyn Dialer>,
    location: Arc<dyn LocationProvider>,
    location_timeout: Duration,
}

impl EmergencyService {
    pub fn new(dialer: Arc<dyn Dialer>, location: Arc<dyn LocationProvider>) -> Self {
        Self {
            controller: Arc::new(Mutex::new(EmergencyController::new(dialer.clone()))),
            countdown: Mutex::new(None),
            dialer,
            location,
            location_timeout: Duration::from_millis(config::LOCATION_TIMEOUT_MS),
        }
    }

    fn controller(&self) -> MutexGuard<'_, EmergencyController> {
        self.controller.lock().unwrap_or_else(|poisoned| {
            tracing::error!("Emergency controller lock poisoned, recovering");
            PoisonError::into_inner(poisoned)
        })
    }

    fn replace_countdown(&self, next: Option<JoinHandle<()>>) {
        let mut slot = self.countdown.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = std::mem::replace(&mut *slot, next) {
            previous.abort();
        }
    }

    pub fn snapshot(&self) -> Result<EmergencySnapshot, EmergencyError> {
        Ok(self.controller().snapshot())
    }

    /// SOS button pressed: show the confirmation prompt.
    pub fn request(&self) -> Result<EmergencySnapshot, EmergencyError> {
        let mut ctl = self.controller();
        ctl.request_sos();
        Ok(ctl.snapshot())
    }

    /// Confirmation accepted: resolve location, then arm.
    ///
    /// The prompt being confirmed is captured before the lookup; if it was
    /// cancelled or replaced meanwhile, nothing is armed.
    pub async fn confirm(&self) -> Result<EmergencySnapshot, EmergencyError> {
        let prompt = self.controller().pending_prompt();
        let Some(prompt) = prompt else {
            return self.snapshot();
        };
        let location = resolve_location(self.location.clone(), self.location_timeout).await;
        self.arm_prompt(prompt, location)
    }

    /// Arm the prompt currently shown with an already resolved location.
    /// No-op unless the flow is waiting for confirmation.
    pub fn arm(&self, location: String) -> Result<EmergencySnapshot, EmergencyError> {
        let prompt = self.controller().generation();
        self.arm_prompt(prompt, location)
    }

    fn arm_prompt(&self, prompt: u64, location: String) -> Result<EmergencySnapshot, EmergencyError> {
        let mut ctl = self.controller();
        if let Some(generation) = ctl.confirm_sos_for(prompt, location) {
            let handle = spawn_countdown(self.controller.clone(), generation);
            self.replace_countdown(Some(handle));
        }
        Ok(ctl.snapshot())
    }

    pub fn cancel(&self) -> Result<EmergencySnapshot, EmergencyError> {
        let mut ctl = self.controller();
        ctl.cancel();
        self.replace_countdown(None);
        Ok(ctl.snapshot())
    }

    /// Manual dial during the countdown.
    pub fn dial_now(&self) -> Result<EmergencySnapshot, EmergencyError> {
        let mut ctl = self.controller();
        if ctl.dial_now().is_some() {
            self.replace_countdown(None);
        }
        Ok(ctl.snapshot())
    }

    /// Call one of the listed contacts directly. Independent of the SOS flow.
    pub fn call_contact(&self, contact_id: &str) -> Result<DialRecord, EmergencyError> {
        let contact = directory::find_contact(contact_id)
            .ok_or_else(|| EmergencyError::ContactNotFound(contact_id.to_string()))?;

        tracing::info!(contact = %contact.name, "Calling emergency contact");
        let result = dial_isolated(self.dialer.as_ref(), &contact.phone_number);
        if let Err(e) = &result {
            tracing::warn!(contact = %contact.name, error = %e, "Contact call failed");
        }

        Ok(DialRecord {
            number: contact.phone_number,
            placed: result.is_ok(),
            error: result.err().map(|e| e.to_string()),
            at: Utc::now(),
        })
    }
}

impl Default for EmergencyService {
    fn default() -> Self {
        Self::new(
            Arc::new(LoggingDialer::new()),
            Arc::new(FixedLocationProvider::default()),
        )
    }
}
