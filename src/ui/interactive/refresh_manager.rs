//! Loop timing for the interactive UI.
//!
//! The catalog refreshes itself through the query cache whenever a stale
//! snapshot is read, so this module only decides how often the loop wakes
//! up: adaptive input polling, the search debounce deadline and periodic
//! cache monitoring.

use crate::constants::polling;
use std::time::Duration;

/// How often cache statistics are logged in long-running sessions
pub(super) const CACHE_MONITOR_INTERVAL: Duration = Duration::from_secs(300);

/// Calculate adaptive polling interval based on user activity
pub(super) fn calculate_poll_interval(time_since_activity: Duration) -> Duration {
    if time_since_activity < Duration::from_secs(polling::SEMI_ACTIVE_THRESHOLD_SECONDS) {
        Duration::from_millis(polling::ACTIVE_MS) // Active: smooth interaction
    } else if time_since_activity < Duration::from_secs(polling::IDLE_THRESHOLD_SECONDS) {
        Duration::from_millis(polling::SEMI_ACTIVE_MS)
    } else {
        Duration::from_millis(polling::IDLE_MS) // Idle: conserve CPU
    }
}

/// Time to sleep before the next loop iteration. A pending search is never
/// applied later than its deadline.
pub(super) fn next_wakeup(poll_interval: Duration, debounce_due_in: Option<Duration>) -> Duration {
    match debounce_due_in {
        Some(due_in) => poll_interval.min(due_in),
        None => poll_interval,
    }
}

/// Whether the loop is busy enough to keep the spinner animating.
pub(super) fn needs_animation(catalog_fetching: bool, badge_loading: bool) -> bool {
    catalog_fetching || badge_loading
}
