//! One-second tick driver for an armed SOS countdown.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::controller::{EmergencyController, TickOutcome};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Spawn the driver for countdown `generation`.
///
/// The task ends on its own once the controller dials or reports the
/// generation as stale. Aborting the handle stops it early; a tick that
/// races the abort is rejected by the generation check.
pub fn spawn_countdown(
    controller: Arc<Mutex<EmergencyController>>,
    generation: u64,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
        // Late ticks fire back to back so a stalled runtime delays the dial as little as possible.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);

        loop {
            ticker.tick().await;

            let outcome = {
                let mut ctl = controller.lock().unwrap_or_else(|poisoned| {
                    tracing::error!("Emergency controller lock poisoned, continuing countdown");
                    PoisonError::into_inner(poisoned)
                });
                ctl.tick_for(generation)
            };

            match outcome {
                TickOutcome::Counting(remaining) => {
                    tracing::debug!(generation, remaining, "SOS countdown tick");
                }
                TickOutcome::Dialed(record) => {
                    tracing::info!(generation, placed = record.placed, "SOS countdown finished");
                    break;
                }
                TickOutcome::Ignored => {
                    tracing::debug!(generation, "SOS countdown driver retired");
                    break;
                }
            }
        }
    })
}
