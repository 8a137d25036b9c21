//! Delayed-task primitives for the fetch orchestrator and the UI.
//!
//! Both the retry backoff and the search debounce are expressed in terms of
//! `tokio::time::Instant`, so tests can pause the runtime clock and advance
//! it instead of waiting on the wall clock.

use std::time::Duration;
use tokio::time::Instant;

use crate::constants::retry;

/// Delay before retry number `attempt` (zero-based).
///
/// Doubles from [`retry::BASE_DELAY_MS`] and is capped at
/// [`retry::MAX_DELAY_SECONDS`]: 1s, 2s, 4s, 8s, 16s, 30s, 30s, ...
pub fn retry_delay(attempt: u32) -> Duration {
    let cap = Duration::from_secs(retry::MAX_DELAY_SECONDS);
    let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
    Duration::from_millis(retry::BASE_DELAY_MS)
        .checked_mul(factor)
        .map_or(cap, |delay| delay.min(cap))
}

/// A single cancelable delayed value.
///
/// Scheduling a new value replaces (cancels) the pending one, so only the
/// last value scheduled within the delay window is ever delivered.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug)]
struct Pending<T> {
    value: T,
    due: Instant,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedules `value` to become due `delay` after `now`, dropping any
    /// previously pending value.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            due: now + self.delay,
        });
    }

    /// Takes the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(pending) if pending.due <= now => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Cancels the pending value, returning it if there was one.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left until the pending value is due.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|pending| pending.due.saturating_duration_since(now))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}
