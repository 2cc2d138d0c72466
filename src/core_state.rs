//! Transport-agnostic application state.
//!
//! `CoreState` owns every piece of per-device state behind the screens:
//! the single SOS flow, the chat conversation, the dashboard checklist and
//! the cart. It is wrapped in `Arc` and shared with the HTTP layer. Each
//! part sits behind its own lock so one screen never blocks another.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::chat::{ChatError, ChatSession};
use crate::config;
use crate::emergency::{Dialer, EmergencyError, EmergencyService, LocationProvider};
use crate::home::{Dashboard, HomeError, HomeView, greeting_now};
use crate::models::Task;
use crate::pharmacy::{Cart, PharmacyError};

/// Audit entries kept in memory; oldest are dropped first.
const AUDIT_BUFFER_CAPACITY: usize = 256;

// ═══════════════════════════════════════════════════════════
// CoreState
// ═══════════════════════════════════════════════════════════

pub struct CoreState {
    emergency: EmergencyService,
    chat: ChatSession,
    dashboard: Mutex<Dashboard>,
    cart: Mutex<Cart>,
    audit: AuditLogger,
    /// Round-trip used by the simulated sign-in.
    pub auth_delay: Duration,
}

impl CoreState {
    /// State with the logging dialer and the fixed location stub.
    pub fn new() -> Self {
        Self::with_parts(
            EmergencyService::default(),
            ChatSession::new(),
            Duration::from_millis(config::AUTH_SIMULATION_DELAY_MS),
        )
    }

    /// State with custom telephony / location collaborators.
    pub fn with_collaborators(
        dialer: Arc<dyn Dialer>,
        location: Arc<dyn LocationProvider>,
    ) -> Self {
        Self::with_parts(
            EmergencyService::new(dialer, location),
            ChatSession::new(),
            Duration::from_millis(config::AUTH_SIMULATION_DELAY_MS),
        )
    }

    pub fn with_parts(emergency: EmergencyService, chat: ChatSession, auth_delay: Duration) -> Self {
        Self {
            emergency,
            chat,
            dashboard: Mutex::new(Dashboard::new()),
            cart: Mutex::new(Cart::new()),
            audit: AuditLogger::new(),
            auth_delay,
        }
    }

    pub fn emergency(&self) -> &EmergencyService {
        &self.emergency
    }

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    // ── Dashboard ───────────────────────────────────────────

    pub fn home_view(&self) -> Result<HomeView, CoreError> {
        let dash = self.dashboard.lock().map_err(|_| CoreError::LockPoisoned)?;
        Ok(dash.view(greeting_now()))
    }

    pub fn toggle_task(&self, task_id: &str) -> Result<Task, CoreError> {
        let mut dash = self.dashboard.lock().map_err(|_| CoreError::LockPoisoned)?;
        Ok(dash.toggle_task(task_id)?)
    }

    // ── Cart ────────────────────────────────────────────────

    pub fn cart_count(&self) -> Result<u32, CoreError> {
        let cart = self.cart.lock().map_err(|_| CoreError::LockPoisoned)?;
        Ok(cart.count)
    }

    pub fn add_to_cart(&self, medicine_id: &str) -> Result<u32, CoreError> {
        let mut cart = self.cart.lock().map_err(|_| CoreError::LockPoisoned)?;
        Ok(cart.add(medicine_id)?)
    }

    // ── Audit ───────────────────────────────────────────────

    pub fn log_access(&self, action: &str, outcome: &str) {
        self.audit.log(action, outcome);
    }

    pub fn audit_entries(&self) -> Vec<AuditEntry> {
        self.audit.entries()
    }
}

impl Default for CoreState {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════
// Error types
// ═══════════════════════════════════════════════════════════

/// Errors from CoreState operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Internal lock error")]
    LockPoisoned,
    #[error(transparent)]
    Emergency(#[from] EmergencyError),
    #[error(transparent)]
    Chat(#[from] ChatError),
    #[error(transparent)]
    Home(#[from] HomeError),
    #[error(transparent)]
    Pharmacy(#[from] PharmacyError),
}

// ═══════════════════════════════════════════════════════════
// Audit logger
// ═══════════════════════════════════════════════════════════

/// Bounded in-memory access log. Nothing is persisted.
pub struct AuditLogger {
    buffer: Mutex<VecDeque<AuditEntry>>,
}

#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub action: String,
    pub outcome: String,
}

impl AuditLogger {
    pub fn new() -> Self {
        Self {
            buffer: Mutex::new(VecDeque::with_capacity(AUDIT_BUFFER_CAPACITY)),
        }
    }

    pub fn log(&self, action: &str, outcome: &str) {
        if let Ok(mut buf) = self.buffer.lock() {
            if buf.len() >= AUDIT_BUFFER_CAPACITY {
                buf.pop_front();
            }
            buf.push_back(AuditEntry {
                timestamp: chrono::Utc::now(),
                action: action.to_string(),
                outcome: outcome.to_string(),
            });
        }
    }

    /// Buffered entries, oldest first.
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.buffer
            .lock()
            .map(|buf| buf.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.buffer.lock().map(|buf| buf.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for AuditLogger {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emergency::EscalationState;

    #[test]
    fn new_state_is_idle() {
        let core = CoreState::new();
        let snap = core.emergency().snapshot().unwrap();
        assert_eq!(snap.state, EscalationState::Idle);
        assert_eq!(core.cart_count().unwrap(), 2);
    }

    #[test]
    fn toggle_task_through_core() {
        let core = CoreState::new();
        assert!(core.toggle_task("3").unwrap().completed);
        assert_eq!(core.home_view().unwrap().completed_tasks, 2);
        assert!(matches!(core.toggle_task("nope"), Err(CoreError::Home(_))));
    }

    #[test]
    fn cart_errors_surface() {
        let core = CoreState::new();
        assert_eq!(core.add_to_cart("2").unwrap(), 3);
        assert!(matches!(core.add_to_cart("3"), Err(CoreError::Pharmacy(_))));
        assert_eq!(core.cart_count().unwrap(), 3);
    }

    #[tokio::test]
    async fn custom_collaborators_are_used() {
        use crate::emergency::{UnavailableDialer, UnavailableLocation};

        let core = CoreState::with_collaborators(Arc::new(UnavailableDialer), Arc::new(UnavailableLocation));
        core.emergency().request().unwrap();
        let snap = core.emergency().confirm().await.unwrap();
        assert_eq!(snap.session.unwrap().location, config::LOCATION_PLACEHOLDER);

        let snap = core.emergency().dial_now().unwrap();
        assert_eq!(snap.state, EscalationState::Idle);
        assert!(!snap.last_dial.unwrap().placed);
    }

    #[test]
    fn audit_buffer_is_bounded() {
        let audit = AuditLogger::new();
        for i in 0..(AUDIT_BUFFER_CAPACITY + 10) {
            audit.log(&format!("GET /api/{i}"), "status:200");
        }
        assert_eq!(audit.len(), AUDIT_BUFFER_CAPACITY);
        assert_eq!(audit.entries()[0].action, "GET /api/10");
    }

    #[test]
    fn log_access_records_entry() {
        let core = CoreState::new();
        core.log_access("POST /api/emergency/request", "status:200");
        let entries = core.audit_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].outcome, "status:200");
    }
}
