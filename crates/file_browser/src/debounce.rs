//! Trailing-edge debounce scheduler.
//!
//! Each `schedule` arms a fresh single-shot timer and invalidates whatever
//! was pending, so within a burst only the last scheduled task fires. The
//! timer rides on the smol executor; invalidation is a generation counter
//! rather than task cancellation, which keeps late timers harmless.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Quiet period shared by the search box and the user-lookup field.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(400);

pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Arm the timer with `task`, superseding any pending task. Only the
    /// most recent task within the quiet window actually runs.
    pub fn schedule<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let armed = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let generation = self.generation.clone();
        let delay = self.delay;
        smol::spawn(async move {
            smol::Timer::after(delay).await;
            if generation.load(Ordering::SeqCst) == armed {
                task();
            }
        })
        .detach();
    }

    /// Drop the pending task, if any, without arming a new one.
    pub fn cancel_pending(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_DELAY)
    }
}
