//! Save coalescing: run an action once input has been quiet for a while.
//!
//! Each [`Debouncer::schedule`] call replaces the previously scheduled action
//! as long as that action's quiet period has not yet elapsed. Once the quiet
//! period is over the action is committed: it still waits out the save
//! latency, but later edits no longer cancel it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Quiet period after the last edit before a save runs.
pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_millis(500);
/// Extra wait between committing to a save and performing it.
pub const DEFAULT_SAVE_LATENCY: Duration = Duration::from_millis(300);

/// Timing of the autosave pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutosaveConfig {
    pub delay: Duration,
    pub save_latency: Duration,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            delay: DEFAULT_AUTOSAVE_DELAY,
            save_latency: DEFAULT_SAVE_LATENCY,
        }
    }
}

struct Scheduled {
    handle: JoinHandle<()>,
    committed: Arc<AtomicBool>,
}

/// A cancellable, restartable timer for deferred saves.
///
/// Must be used from within a tokio runtime.
pub struct Debouncer {
    config: AutosaveConfig,
    pending: Option<Scheduled>,
    in_flight: Vec<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(config: AutosaveConfig) -> Self {
        Self {
            config,
            pending: None,
            in_flight: Vec::new(),
        }
    }

    /// Schedules `action` to run after the quiet period plus the save latency,
    /// cancelling a previously scheduled action that has not committed yet.
    pub fn schedule<F>(&mut self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        self.in_flight.retain(|handle| !handle.is_finished());

        let committed = Arc::new(AtomicBool::new(false));
        let flag = committed.clone();
        let AutosaveConfig { delay, save_latency } = self.config;
        // The quiet period starts now, not when the task is first polled.
        let deadline = tokio::time::Instant::now() + delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            flag.store(true, Ordering::SeqCst);
            if !save_latency.is_zero() {
                tokio::time::sleep(save_latency).await;
            }
            action();
        });

        self.pending = Some(Scheduled { handle, committed });
    }

    /// Aborts the scheduled action if its quiet period has not elapsed.
    ///
    /// Returns `true` if an action was cancelled.
    pub fn cancel(&mut self) -> bool {
        let Some(scheduled) = self.pending.take() else {
            return false;
        };

        if scheduled.committed.load(Ordering::SeqCst) {
            self.in_flight.push(scheduled.handle);
            false
        } else {
            scheduled.handle.abort();
            log::trace!("pending autosave cancelled");
            true
        }
    }

    /// `true` while a scheduled or committed action has not finished.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|s| !s.handle.is_finished())
            || self.in_flight.iter().any(|h| !h.is_finished())
    }

    /// Waits for every scheduled and committed action to finish.
    pub async fn settle(&mut self) {
        let mut handles: Vec<JoinHandle<()>> = self.in_flight.drain(..).collect();
        if let Some(scheduled) = self.pending.take() {
            handles.push(scheduled.handle);
        }
        for handle in handles {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    log::error!("autosave task failed: {e}");
                }
            }
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
