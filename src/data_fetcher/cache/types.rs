//! Cache data structures with freshness tracking

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use futures::future::{BoxFuture, Shared};
use tokio::time::Instant;

use crate::constants::cache_ttl;
use crate::data_fetcher::models::SeasonBadge;
use crate::error::QueryError;

/// Logical request key. Displayed as `leagues` or `badge:<leagueId>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Leagues,
    Badge(String),
}

impl QueryKey {
    pub fn badge(league_id: impl Into<String>) -> Self {
        Self::Badge(league_id.into())
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::Leagues => write!(f, "leagues"),
            QueryKey::Badge(league_id) => write!(f, "badge:{league_id}"),
        }
    }
}

/// Freshness and eviction windows applied by the query cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// Data younger than this is served without a network call
    pub stale_time: Duration,
    /// Entries untouched for this long are evicted
    pub idle_eviction: Duration,
    /// Maximum number of badge entries kept
    pub badge_capacity: usize,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            stale_time: Duration::from_secs(cache_ttl::STALE_SECONDS),
            idle_eviction: Duration::from_secs(cache_ttl::IDLE_EVICTION_SECONDS),
            badge_capacity: cache_ttl::BADGE_CAPACITY,
        }
    }
}

pub(crate) type QueryResult<T> = Result<Arc<T>, QueryError>;

/// A request in progress. Cloned by every caller that joins it.
pub(crate) type InFlight<T> = Shared<BoxFuture<'static, QueryResult<T>>>;

/// One cache slot.
pub(crate) struct CacheEntry<T> {
    pub data: Option<Arc<T>>,
    pub error: Option<QueryError>,
    pub updated_at: Option<Instant>,
    pub error_at: Option<Instant>,
    pub last_accessed: Instant,
    pub in_flight: Option<InFlight<T>>,
}

impl<T> CacheEntry<T> {
    pub fn new(now: Instant) -> Self {
        Self {
            data: None,
            error: None,
            updated_at: None,
            error_at: None,
            last_accessed: now,
            in_flight: None,
        }
    }

    /// Data older than `stale_time` (or no data at all) is stale.
    pub fn is_stale(&self, now: Instant, stale_time: Duration) -> bool {
        self.updated_at
            .is_none_or(|updated_at| now.saturating_duration_since(updated_at) >= stale_time)
    }

    /// Idle entries without a request in progress may be evicted.
    pub fn is_idle(&self, now: Instant, idle_eviction: Duration) -> bool {
        self.in_flight.is_none()
            && now.saturating_duration_since(self.last_accessed) >= idle_eviction
    }

    /// Whether an automatic (non-manual) fetch should start.
    ///
    /// - a request in progress is joined, never duplicated
    /// - an entry that has only ever failed waits for a manual retry
    /// - stale data is refreshed, unless the last refresh failed less than
    ///   `stale_time` ago
    pub fn wants_auto_fetch(&self, now: Instant, stale_time: Duration) -> bool {
        if self.in_flight.is_some() {
            return false;
        }
        match (&self.data, self.error_at) {
            (None, None) => true,
            (None, Some(_)) => false,
            (Some(_), None) => self.is_stale(now, stale_time),
            (Some(_), Some(error_at)) => {
                self.is_stale(now, stale_time)
                    && now.saturating_duration_since(error_at) >= stale_time
            }
        }
    }

    pub fn state(&self) -> QueryState<T> {
        let is_fetching = self.in_flight.is_some();
        QueryState {
            data: self.data.clone(),
            is_loading: is_fetching && self.data.is_none(),
            is_fetching,
            error: self.error.clone(),
            updated_at: self.updated_at,
        }
    }
}

/// Snapshot of a query handed to consumers.
#[derive(Debug)]
pub struct QueryState<T> {
    pub data: Option<Arc<T>>,
    /// A request is in progress and there is no data to show yet
    pub is_loading: bool,
    /// A request is in progress (initial load or background refresh)
    pub is_fetching: bool,
    /// Error of the most recent request, kept next to older data
    pub error: Option<QueryError>,
    pub updated_at: Option<Instant>,
}

impl<T> QueryState<T> {
    /// State of a key that has never been requested.
    pub fn idle() -> Self {
        Self {
            data: None,
            is_loading: false,
            is_fetching: false,
            error: None,
            updated_at: None,
        }
    }
}

impl<T> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            is_loading: self.is_loading,
            is_fetching: self.is_fetching,
            error: self.error.clone(),
            updated_at: self.updated_at,
        }
    }
}

/// Badge view of a query. Failures collapse into "no badge".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BadgeState {
    pub badge: Option<SeasonBadge>,
    pub is_loading: bool,
}

impl From<QueryState<Option<SeasonBadge>>> for BadgeState {
    fn from(state: QueryState<Option<SeasonBadge>>) -> Self {
        Self {
            badge: state.data.and_then(|badge| (*badge).clone()),
            is_loading: state.is_loading,
        }
    }
}

/// Cache information structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheInfo {
    pub size: usize,
    pub capacity: usize,
    pub in_flight: usize,
}

/// Combined cache statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub league_cache: CacheInfo,
    pub badge_cache: CacheInfo,
}
