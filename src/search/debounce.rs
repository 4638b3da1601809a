//! Query debouncing
//!
//! Collapses a burst of query edits into a single search trigger. The
//! controller never owns a timer itself: `on_query_changed` tells the caller
//! how long to wait, and the caller reports back with `on_timer_fired` when
//! that wait is over. Several timers may be outstanding at once; only the
//! first one that fires after a quiet interval produces a trigger.

use std::time::{Duration, Instant};

/// Default quiet period
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(300);

/// Debounce state for one query input
#[derive(Debug, Clone)]
pub struct Debouncer {
    interval: Duration,
    last_change: Option<Instant>,
    pending: bool,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

impl Debouncer {
    /// Create a debouncer with the given quiet period
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_change: None,
            pending: false,
        }
    }

    /// Quiet period
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether a trigger is waiting to be emitted
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Record an edit; returns how long the caller should wait before firing
    pub fn on_query_changed(&mut self, now: Instant) -> Duration {
        self.last_change = Some(now);
        self.pending = true;
        self.interval
    }

    /// A timer armed earlier has fired
    ///
    /// Returns `true` when a search should start now. While a round is in
    /// flight the trigger is held back and stays pending.
    pub fn on_timer_fired(&mut self, now: Instant, in_flight: bool) -> bool {
        if !self.pending || in_flight {
            return false;
        }

        let quiet = self
            .last_change
            .is_none_or(|last| now.saturating_duration_since(last) >= self.interval);
        if !quiet {
            return false;
        }

        self.pending = false;
        true
    }

    /// Drop any pending trigger
    pub fn reset(&mut self) {
        self.pending = false;
        self.last_change = None;
    }

    /// Time left until a pending trigger may fire, if any
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        if !self.pending {
            return None;
        }
        let elapsed = self
            .last_change
            .map_or(self.interval, |last| now.saturating_duration_since(last));
        Some(self.interval.saturating_sub(elapsed))
    }
}
