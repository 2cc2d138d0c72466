//! SOS escalation state machine.
//!
//! `Idle → Confirming → CountingDown(n) → Dialing → Idle`, with cancel
//! returning to `Idle` from any armed state. The controller is synchronous
//! and owns no timers: something else delivers one [`tick_for`] per second.
//! Every prompt and every arming gets a new generation, so a confirmation
//! or tick addressed to an earlier prompt or countdown is ignored.
//!
//! [`tick_for`]: EmergencyController::tick_for

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::collaborators::{dial_isolated, Dialer};
use crate::config::{EMERGENCY_NUMBER, SOS_COUNTDOWN_SECS};
use crate::models::EmergencySession;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "seconds_remaining")]
pub enum EscalationState {
    Idle,
    Confirming,
    CountingDown(u32),
    /// Transient: held only while the dialer runs.
    Dialing,
}

/// Outcome of one dial attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialRecord {
    pub number: String,
    pub placed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub at: DateTime<Utc>,
}

/// What a tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not counting down, or the tick belonged to an older countdown.
    Ignored,
    /// Still counting; seconds left.
    Counting(u32),
    /// Countdown completed and the emergency number was requested.
    Dialed(DialRecord),
}

/// UI view of the SOS flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencySnapshot {
    pub state: EscalationState,
    pub session: Option<EmergencySession>,
    pub seconds_remaining: u32,
    pub dials_placed: u32,
    pub last_dial: Option<DialRecord>,
}

pub struct EmergencyController {
    state: EscalationState,
    session: Option<EmergencySession>,
    generation: u64,
    dials_placed: u32,
    last_dial: Option<DialRecord>,
    dialer: Arc<dyn Dialer>,
}

impl EmergencyController {
    pub fn new(dialer: Arc<dyn Dialer>) -> Self {
        Self {
            state: EscalationState::Idle,
            session: None,
            generation: 0,
            dials_placed: 0,
            last_dial: None,
            dialer,
        }
    }

    pub fn state(&self) -> EscalationState {
        self.state
    }

    pub fn session(&self) -> Option<&EmergencySession> {
        self.session.as_ref()
    }

    /// Generation of the current prompt or countdown.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Emergency dials requested since startup.
    pub fn dials_placed(&self) -> u32 {
        self.dials_placed
    }

    pub fn last_dial(&self) -> Option<&DialRecord> {
        self.last_dial.as_ref()
    }

    pub fn seconds_remaining(&self) -> u32 {
        match self.state {
            EscalationState::CountingDown(n) => n,
            _ => SOS_COUNTDOWN_SECS,
        }
    }

    pub fn snapshot(&self) -> EmergencySnapshot {
        EmergencySnapshot {
            state: self.state,
            session: self.session.clone(),
            seconds_remaining: self.seconds_remaining(),
            dials_placed: self.dials_placed,
            last_dial: self.last_dial.clone(),
        }
    }

    /// Ask for confirmation. Only valid from `Idle`; returns whether it moved.
    pub fn request_sos(&mut self) -> bool {
        if self.state != EscalationState::Idle {
            tracing::debug!(state = ?self.state, "SOS request ignored");
            return false;
        }
        self.generation += 1;
        self.state = EscalationState::Confirming;
        tracing::info!(generation = self.generation, "SOS requested, awaiting confirmation");
        true
    }

    /// Generation of the prompt awaiting confirmation, if any.
    pub fn pending_prompt(&self) -> Option<u64> {
        (self.state == EscalationState::Confirming).then_some(self.generation)
    }

    /// Arm the countdown for the prompt currently shown.
    pub fn confirm_sos(&mut self, location: String) -> Option<u64> {
        self.confirm_sos_for(self.generation, location)
    }

    /// Arm the countdown only if `prompt` is still the prompt on screen.
    /// Returns the generation that ticks for this countdown must carry.
    pub fn confirm_sos_for(&mut self, prompt: u64, location: String) -> Option<u64> {
        if self.state != EscalationState::Confirming {
            tracing::debug!(state = ?self.state, "SOS confirm ignored");
            return None;
        }
        if prompt != self.generation {
            tracing::warn!(prompt, current = self.generation, "Stale SOS confirmation ignored");
            return None;
        }
        self.generation += 1;
        self.state = EscalationState::CountingDown(SOS_COUNTDOWN_SECS);
        self.session = Some(EmergencySession {
            active: true,
            seconds_remaining: SOS_COUNTDOWN_SECS,
            location,
        });
        tracing::warn!(
            generation = self.generation,
            seconds = SOS_COUNTDOWN_SECS,
            "SOS armed, countdown started"
        );
        Some(self.generation)
    }

    /// Advance the current countdown by one second.
    pub fn tick(&mut self) -> TickOutcome {
        self.tick_for(self.generation)
    }

    /// Advance the countdown only if `generation` is still current.
    pub fn tick_for(&mut self, generation: u64) -> TickOutcome {
        let EscalationState::CountingDown(n) = self.state else {
            return TickOutcome::Ignored;
        };
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "Stale tick ignored");
            return TickOutcome::Ignored;
        }

        let remaining = n.saturating_sub(1);
        if remaining == 0 {
            return TickOutcome::Dialed(self.complete());
        }

        self.state = EscalationState::CountingDown(remaining);
        if let Some(session) = self.session.as_mut() {
            session.seconds_remaining = remaining;
        }
        TickOutcome::Counting(remaining)
    }

    /// Dial immediately while counting down. Same outcome as the timeout.
    pub fn dial_now(&mut self) -> Option<DialRecord> {
        match self.state {
            EscalationState::CountingDown(_) => Some(self.complete()),
            _ => None,
        }
    }

    /// Abort the flow from any armed state. Returns whether anything was cancelled.
    pub fn cancel(&mut self) -> bool {
        if self.state == EscalationState::Idle {
            return false;
        }
        tracing::info!(state = ?self.state, "SOS cancelled");
        self.reset();
        true
    }

    fn complete(&mut self) -> DialRecord {
        self.state = EscalationState::Dialing;
        tracing::warn!(number = EMERGENCY_NUMBER, "SOS countdown complete, dialing");

        let record = match dial_isolated(self.dialer.as_ref(), EMERGENCY_NUMBER) {
            Ok(()) => DialRecord {
                number: EMERGENCY_NUMBER.to_string(),
                placed: true,
                error: None,
                at: Utc::now(),
            },
            Err(e) => {
                tracing::warn!(error = %e, "Emergency dial failed");
                DialRecord {
                    number: EMERGENCY_NUMBER.to_string(),
                    placed: false,
                    error: Some(e.to_string()),
                    at: Utc::now(),
                }
            }
        };

        self.dials_placed += 1;
        self.last_dial = Some(record.clone());
        self.reset();
        record
    }

    fn reset(&mut self) {
        self.state = EscalationState::Idle;
        self.session = None;
        // Invalidate any tick still in flight for the finished countdown.
        self.generation += 1;
    }
}
