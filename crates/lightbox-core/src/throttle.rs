//! Rate limiting for bursty input (wheel notches, resize storms, rescans).
//!
//! Both primitives take the current instant explicitly so the UI loop and
//! the tests drive time the same way.

use std::time::{Duration, Instant};

/// Coalesces calls to at most one per interval, keeping the latest value.
///
/// The first value after a quiet interval passes through immediately.
/// Values arriving inside the interval replace each other; the survivor is
/// released by [`Throttle::poll`] once the interval has elapsed, so the most
/// recent intent is never dropped.
#[derive(Debug, Clone)]
pub struct Throttle<T> {
    interval: Duration,
    last_emit: Option<Instant>,
    pending: Option<T>,
}

impl<T> Throttle<T> {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_emit: None,
            pending: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    fn ready(&self, now: Instant) -> bool {
        self.last_emit
            .map_or(true, |last| now.saturating_duration_since(last) >= self.interval)
    }

    /// Offer a value. Returns it back if it may be applied right now.
    pub fn submit(&mut self, value: T, now: Instant) -> Option<T> {
        if self.ready(now) {
            self.last_emit = Some(now);
            self.pending = None;
            Some(value)
        } else {
            self.pending = Some(value);
            None
        }
    }

    /// Release the pending value once the interval has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.pending.is_some() && self.ready(now) {
            self.last_emit = Some(now);
            self.pending.take()
        } else {
            None
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left until a pending value can be released.
    pub fn time_until_ready(&self, now: Instant) -> Option<Duration> {
        self.pending.as_ref()?;
        let last = self.last_emit?;
        Some(self.interval.saturating_sub(now.saturating_duration_since(last)))
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

/// Fires once after the input has been quiet for the configured delay.
#[derive(Debug, Clone)]
pub struct Debounce<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debounce<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Record a value; restarts the quiet period.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
        tracing::trace!("debounce scheduled in {}ms", self.delay.as_millis());
    }

    /// Returns the latest value once the quiet period has elapsed.
    pub fn tick(&mut self, now: Instant) -> Option<T> {
        let (_, trigger_at) = self.pending.as_ref()?;
        if now >= *trigger_at {
            self.pending.take().map(|(value, _)| value)
        } else {
            None
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
