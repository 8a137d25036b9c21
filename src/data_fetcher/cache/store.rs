//! Keyed store of cache entries with in-flight request tracking.

use lru::LruCache;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::types::{CacheEntry, CacheInfo, InFlight, QueryKey, QueryResult, QueryState};

/// How a caller wants a key to be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FetchMode {
    /// Fetch only if missing or stale, following the entry's retry rules
    Auto,
    /// Manual refetch. Clears the error and fetches even if fresh.
    Force,
}

/// Outcome of [`QueryStore::acquire`].
pub(crate) struct Acquired<T> {
    pub state: QueryState<T>,
    /// Request the caller may await. Present when one was joined or started.
    pub in_flight: Option<InFlight<T>>,
    /// True when this call created the request and must drive it.
    pub started: bool,
}

/// LRU-bounded map from [`QueryKey`] to [`CacheEntry`].
///
/// Capacity is enforced here rather than by [`LruCache`] itself: only
/// entries without a request in flight are evicted, so a running request
/// can always be joined and its result always lands in its own entry. When
/// every entry is in flight the store grows past `capacity` until one of
/// them completes.
///
/// The lock is only taken inside synchronous methods and never held across
/// an `.await`.
pub(crate) struct QueryStore<T> {
    name: &'static str,
    capacity: usize,
    entries: Mutex<LruCache<QueryKey, CacheEntry<T>>>,
}

impl<T: Send + Sync + 'static> QueryStore<T> {
    pub fn new(name: &'static str, capacity: usize) -> Self {
        Self {
            name,
            capacity: capacity.max(1),
            entries: Mutex::new(LruCache::unbounded()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<QueryKey, CacheEntry<T>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Evicts least recently used idle entries until a new `key` fits.
    fn make_room(&self, entries: &mut LruCache<QueryKey, CacheEntry<T>>, key: &QueryKey) {
        if entries.contains(key) {
            return;
        }
        while entries.len() >= self.capacity {
            let victim = entries
                .iter()
                .rev()
                .find(|(_, entry)| entry.in_flight.is_none())
                .map(|(victim, _)| victim.clone());
            match victim {
                Some(victim) => {
                    entries.pop(&victim);
                    debug!("Evicted LRU cache entry: cache={}, key={}", self.name, victim);
                }
                None => {
                    debug!(
                        "All entries in flight, growing past capacity: cache={}, capacity={}",
                        self.name, self.capacity
                    );
                    break;
                }
            }
        }
    }

    /// Current state of `key` without touching or creating the entry.
    pub fn peek(&self, key: &QueryKey) -> QueryState<T> {
        self.lock()
            .peek(key)
            .map(CacheEntry::state)
            .unwrap_or_else(QueryState::idle)
    }

    /// Marks `key` as used and decides whether a request has to start.
    ///
    /// A request already in progress is always joined. Otherwise `start` is
    /// called to build a new one when `mode` asks for it. The returned
    /// future is not polled here; a caller with `started == true` has to
    /// drive it.
    pub fn acquire<F>(
        &self,
        key: &QueryKey,
        now: Instant,
        mode: FetchMode,
        stale_time: Duration,
        start: F,
    ) -> Acquired<T>
    where
        F: FnOnce() -> BoxFuture<'static, QueryResult<T>>,
    {
        let mut entries = self.lock();
        self.make_room(&mut entries, key);
        let entry = entries.get_or_insert_mut(key.clone(), || CacheEntry::new(now));
        entry.last_accessed = now;

        if let Some(in_flight) = &entry.in_flight {
            debug!("Joining in-flight request: cache={}, key={}", self.name, key);
            return Acquired {
                state: entry.state(),
                in_flight: Some(in_flight.clone()),
                started: false,
            };
        }

        let should_start = match mode {
            FetchMode::Force => true,
            FetchMode::Auto => entry.wants_auto_fetch(now, stale_time),
        };

        if !should_start {
            debug!(
                "Serving cached state: cache={}, key={}, has_data={}, has_error={}",
                self.name,
                key,
                entry.data.is_some(),
                entry.error.is_some()
            );
            return Acquired {
                state: entry.state(),
                in_flight: None,
                started: false,
            };
        }

        if mode == FetchMode::Force {
            entry.error = None;
            entry.error_at = None;
        }

        info!(
            "Starting request: cache={}, key={}, mode={:?}, background={}",
            self.name,
            key,
            mode,
            entry.data.is_some()
        );
        let in_flight = start().shared();
        entry.in_flight = Some(in_flight.clone());

        Acquired {
            state: entry.state(),
            in_flight: Some(in_flight),
            started: true,
        }
    }

    /// Records the outcome of the request for `key`.
    ///
    /// Success replaces the data wholesale. Failure keeps whatever data the
    /// entry already had and stores the error next to it.
    pub fn complete(&self, key: &QueryKey, result: &QueryResult<T>, now: Instant) {
        let mut entries = self.lock();
        self.make_room(&mut entries, key);
        let entry = entries.get_or_insert_mut(key.clone(), || CacheEntry::new(now));
        entry.in_flight = None;

        match result {
            Ok(data) => {
                entry.data = Some(data.clone());
                entry.updated_at = Some(now);
                entry.error = None;
                entry.error_at = None;
                debug!("Cached result: cache={}, key={}", self.name, key);
            }
            Err(e) => {
                warn!(
                    "Request failed: cache={}, key={}, keeping_previous_data={}, error={}",
                    self.name,
                    key,
                    entry.data.is_some(),
                    e
                );
                entry.error = Some(e.clone());
                entry.error_at = Some(now);
            }
        }
    }

    /// Removes entries untouched for `idle_eviction`. Returns how many were
    /// removed.
    pub fn evict_idle(&self, now: Instant, idle_eviction: Duration) -> usize {
        let mut entries = self.lock();
        let idle_keys: Vec<QueryKey> = entries
            .iter()
            .filter(|(_, entry)| entry.is_idle(now, idle_eviction))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &idle_keys {
            entries.pop(key);
            debug!("Evicted idle cache entry: cache={}, key={}", self.name, key);
        }

        idle_keys.len()
    }

    pub fn info(&self) -> CacheInfo {
        let entries = self.lock();
        CacheInfo {
            size: entries.len(),
            capacity: self.capacity,
            in_flight: entries
                .iter()
                .filter(|(_, entry)| entry.in_flight.is_some())
                .count(),
        }
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}
