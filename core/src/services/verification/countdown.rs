//! Code validity countdown.
//!
//! Wraps a background tokio task that ticks once per second. The flow
//! reads the remaining seconds for display and checks `is_active` before
//! letting a verification attempt through. Exactly one tick task exists
//! per countdown: starting again first cancels the previous task, so a
//! resend can never leave two tickers decrementing the same counter.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::{self, Duration};

/// Countdown timer for the validity window of an issued code
#[derive(Debug, Default)]
pub struct Countdown {
    remaining: Arc<AtomicU32>,
    active: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

impl Countdown {
    /// Create an inactive countdown showing zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the countdown from `duration_secs`.
    ///
    /// Any previous tick task is cancelled first. Starting with zero
    /// seconds leaves the countdown inactive.
    pub fn start(&mut self, duration_secs: u32) {
        self.cancel_task();
        self.remaining.store(duration_secs, Ordering::SeqCst);
        self.active.store(duration_secs > 0, Ordering::SeqCst);
        if duration_secs == 0 {
            return;
        }

        let remaining = Arc::clone(&self.remaining);
        let active = Arc::clone(&self.active);
        self.task = Some(tokio::spawn(async move {
            let mut interval = time::interval(Duration::from_secs(1));
            // the first tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                let left = remaining.load(Ordering::SeqCst).saturating_sub(1);
                remaining.store(left, Ordering::SeqCst);
                if left == 0 {
                    active.store(false, Ordering::SeqCst);
                    break;
                }
            }
        }));
    }

    /// Stop ticking without clearing the displayed value.
    ///
    /// Used on verification success so the view keeps showing the time
    /// that was left.
    pub fn stop(&mut self) {
        self.cancel_task();
        self.active.store(false, Ordering::SeqCst);
    }

    /// Stop ticking and reset the display to zero.
    ///
    /// Used on channel switches and full flow resets.
    pub fn clear(&mut self) {
        self.cancel_task();
        self.active.store(false, Ordering::SeqCst);
        self.remaining.store(0, Ordering::SeqCst);
    }

    /// Seconds left in the validity window
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining.load(Ordering::SeqCst)
    }

    /// Whether the window is still open
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn cancel_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.cancel_task();
    }
}
