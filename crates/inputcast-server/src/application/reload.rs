//! Debounced reload signal.
//!
//! External triggers (a settings UI, a file-drop, a remote client) may
//! request a reload in bursts. The [`Debouncer`] is an explicit timer
//! primitive: each trigger arms (or re-arms) a pending delay, and only when
//! the delay elapses with no intervening trigger does the callback fire —
//! so a burst collapses to a single reload. Dropping the debouncer cancels
//! any pending timer.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::debug;

/// Delay a reload request waits for further requests before firing.
pub const RELOAD_DEBOUNCE: Duration = Duration::from_secs(1);

/// Collapses trigger bursts into single callback invocations.
pub struct Debouncer {
    tx: mpsc::UnboundedSender<()>,
    task: JoinHandle<()>,
}

impl Debouncer {
    /// Spawns the timer task. `on_fire` runs on the Tokio runtime after each
    /// settled burst; keep it cheap (spawn real work).
    pub fn new<F>(delay: Duration, mut on_fire: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<()>();

        let task = tokio::spawn(async move {
            // Outer loop: wait for the first trigger of a burst.
            while rx.recv().await.is_some() {
                // Inner loop: every further trigger re-arms the delay.
                loop {
                    tokio::select! {
                        _ = sleep(delay) => {
                            debug!("debounce window settled; firing");
                            on_fire();
                            break;
                        }
                        more = rx.recv() => {
                            match more {
                                Some(()) => continue,
                                // Sender dropped mid-burst: cancelled.
                                None => return,
                            }
                        }
                    }
                }
            }
        });

        Self { tx, task }
    }

    /// Requests a (re-)armed firing after the configured delay.
    pub fn trigger(&self) {
        // A closed channel means the task was cancelled; nothing to do.
        let _ = self.tx.send(());
    }

    /// Cancels any pending firing and stops the timer task.
    pub fn cancel(self) {
        // Drop does the work.
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
