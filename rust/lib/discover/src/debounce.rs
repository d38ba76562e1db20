use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

/// Quiet period input must hold before a search fires.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

struct Pending {
    key: String,
    cancel: CancellationToken,
}

/// Trailing-edge debouncer.
///
/// Each [`schedule`](Self::schedule) replaces the pending action and restarts
/// the quiet period. Once the period lapses the action runs to completion;
/// later calls only affect actions that have not started yet.
///
/// Every action is keyed by the input it was scheduled for, so a caller can
/// drop the pending action only when it is about the same input.
pub struct DebounceGate {
    delay: Duration,
    pending: Mutex<Option<Pending>>,
    tracker: TaskTracker,
}

impl DebounceGate {
    pub fn new() -> Self {
        Self::with_tracker(TaskTracker::new())
    }

    /// Spawn timers and actions on `tracker`, so waiting on it also waits
    /// for debounced work that is queued or running.
    pub fn with_tracker(tracker: TaskTracker) -> Self {
        Self {
            delay: DEBOUNCE_DELAY,
            pending: Mutex::new(None),
            tracker,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `action` after the quiet period unless another call arrives
    /// first. Must be called from within a tokio runtime.
    pub fn schedule<F, Fut>(&self, key: impl Into<String>, action: F) -> JoinHandle<()>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let deadline = Instant::now() + self.delay;

        let next = Pending {
            key: key.into(),
            cancel: cancel.clone(),
        };
        if let Some(previous) = self.lock().replace(next) {
            previous.cancel.cancel();
        }

        self.tracker.spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = tokio::time::sleep_until(deadline) => {}
            }
            // Fired: no longer pending for `cancel_key`.
            cancel.cancel();
            action().await;
        })
    }

    /// Drop the pending action, if any.
    pub fn cancel(&self) {
        if let Some(pending) = self.lock().take() {
            pending.cancel.cancel();
        }
    }

    /// Drop the pending action only if it was scheduled under `key`.
    /// Returns whether one was dropped.
    pub fn cancel_key(&self, key: &str) -> bool {
        let mut pending = self.lock();
        if pending.as_ref().is_some_and(|p| p.key == key && !p.cancel.is_cancelled()) {
            if let Some(p) = pending.take() {
                p.cancel.cancel();
            }
            return true;
        }
        false
    }

    fn lock(&self) -> MutexGuard<'_, Option<Pending>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for DebounceGate {
    fn default() -> Self {
        Self::new()
    }
}
