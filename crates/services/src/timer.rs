//! Drives a [`Countdown`] from a one-second tokio interval.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::debug;

use quiz_core::timer::{Countdown, TimerEvent};

const TICK: Duration = Duration::from_secs(1);

/// Background tick source for a session countdown.
///
/// Only `Ticked` and `Expired` events are delivered. The tick task stops after
/// expiry, and is aborted when the `TimerTask` is dropped so no orphaned
/// updates outlive the view that owns it.
pub struct TimerTask {
    events: mpsc::Receiver<TimerEvent>,
    active: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl TimerTask {
    /// Spawn the tick loop on the current tokio runtime.
    #[must_use]
    pub fn spawn(mut countdown: Countdown) -> Self {
        let (event_tx, events) = mpsc::channel(8);
        let (active, active_rx) = watch::channel(countdown.is_active());

        let handle = tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + TICK, TICK);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                countdown.set_active(*active_rx.borrow());
                let event = countdown.tick();
                debug!(?event, remaining = countdown.remaining_secs(), "timer tick");
                match event {
                    TimerEvent::Idle => continue,
                    TimerEvent::Ticked { .. } => {
                        if event_tx.send(event).await.is_err() {
                            break;
                        }
                    }
                    TimerEvent::Expired => {
                        let _ = event_tx.send(event).await;
                        break;
                    }
                }
            }
        });

        Self {
            events,
            active,
            handle,
        }
    }

    /// Pause (`false`) or resume (`true`) the countdown.
    pub fn set_active(&self, active: bool) {
        self.active.send_replace(active);
    }

    /// Wait for the next tick or expiry. `None` once the countdown is finished.
    pub async fn next_event(&mut self) -> Option<TimerEvent> {
        self.events.recv().await
    }

    /// Stop the tick source.
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for TimerTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
