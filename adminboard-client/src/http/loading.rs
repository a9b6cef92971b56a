//! Loading indicator bookkeeping
//!
//! Overlapping requests share one overlay. A counter, not a flag, tracks
//! them: the overlay is shown on the 0 → 1 transition and hidden on 1 → 0,
//! and both transitions happen under the same lock as the count change.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use adminboard_client::http::{LoadingTracker, TracingIndicator};
//!
//! let tracker = Arc::new(LoadingTracker::new(Arc::new(TracingIndicator)));
//!
//! let first = tracker.acquire();
//! let second = tracker.acquire();
//! assert_eq!(tracker.pending(), 2);
//!
//! drop(first);
//! assert!(tracker.is_visible());
//! drop(second);
//! assert!(!tracker.is_visible());
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

/// Text shown on the overlay
pub const LOADING_TEXT: &str = "加载中...";

/// The loading overlay
///
/// Called with the tracker's lock held; implementations must not call
/// back into the tracker.
pub trait LoadingIndicator: Send + Sync {
    fn show(&self);
    fn hide(&self);
}

/// Indicator that only logs
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingIndicator;

impl LoadingIndicator for TracingIndicator {
    fn show(&self) {
        tracing::debug!("{}", LOADING_TEXT);
    }

    fn hide(&self) {
        tracing::debug!("Loading finished");
    }
}

/// Counts in-flight requests and drives a [`LoadingIndicator`]
pub struct LoadingTracker {
    pending: Mutex<usize>,
    indicator: Arc<dyn LoadingIndicator>,
}

impl LoadingTracker {
    pub fn new(indicator: Arc<dyn LoadingIndicator>) -> Self {
        Self {
            pending: Mutex::new(0),
            indicator,
        }
    }

    /// Registers one in-flight request
    ///
    /// The returned guard releases it when dropped.
    pub fn acquire(self: &Arc<Self>) -> LoadingGuard {
        let mut pending = self.lock();
        if *pending == 0 {
            self.indicator.show();
        }
        *pending += 1;

        LoadingGuard {
            tracker: Arc::clone(self),
        }
    }

    /// Number of in-flight requests
    pub fn pending(&self) -> usize {
        *self.lock()
    }

    /// Whether the overlay is currently shown
    pub fn is_visible(&self) -> bool {
        self.pending() > 0
    }

    fn release(&self) {
        let mut pending = self.lock();
        match *pending {
            0 => {
                tracing::warn!("Loading counter released below zero; clamped");
            }
            1 => {
                *pending = 0;
                self.indicator.hide();
            }
            _ => *pending -= 1,
        }
    }

    fn lock(&self) -> MutexGuard<'_, usize> {
        // A plain counter stays consistent even if a holder panicked
        self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for LoadingTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadingTracker")
            .field("pending", &self.pending())
            .finish()
    }
}

/// One in-flight request's hold on the overlay
#[must_use = "dropping the guard immediately releases the loading indicator"]
#[derive(Debug)]
pub struct LoadingGuard {
    tracker: Arc<LoadingTracker>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.tracker.release();
    }
}
