//! The query client: cached, deduplicated access to the league catalog and
//! season badges.
//!
//! Snapshot methods ([`QueryClient::leagues`], [`QueryClient::badge`]) never
//! wait on the network. When a fetch is needed they spawn it onto the
//! current Tokio runtime and return immediately, so they must be called from
//! inside a runtime. The spawned request writes its outcome into the cache
//! and bumps [`QueryClient::generation`] before any awaiting caller sees it.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::FutureExt;
use tokio::time::Instant;
use tracing::{debug, error, info, instrument, warn};

use super::store::{Acquired, FetchMode, QueryStore};
use super::types::{BadgeState, CachePolicy, CacheStats, QueryKey, QueryResult, QueryState};
use crate::constants::retry;
use crate::data_fetcher::api::CatalogSource;
use crate::data_fetcher::models::{League, SeasonBadge};
use crate::error::QueryError;
use crate::scheduling::retry_delay;

/// Cheaply cloneable handle to one cache. Clones share state.
pub struct QueryClient<S> {
    inner: Arc<ClientInner<S>>,
}

struct ClientInner<S> {
    source: S,
    policy: CachePolicy,
    leagues: QueryStore<Vec<League>>,
    badges: QueryStore<Option<SeasonBadge>>,
    generation: AtomicU64,
}

impl<S> Clone for QueryClient<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> ClientInner<S> {
    fn bump_generation(&self) {
        self.generation.fetch_add(1, Ordering::Release);
    }
}

impl<S: CatalogSource> QueryClient<S> {
    pub fn new(source: S) -> Self {
        Self::with_policy(source, CachePolicy::default())
    }

    pub fn with_policy(source: S, policy: CachePolicy) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                source,
                policy,
                leagues: QueryStore::new("leagues", 1),
                badges: QueryStore::new("badges", policy.badge_capacity),
                generation: AtomicU64::new(0),
            }),
        }
    }

    pub fn source(&self) -> &S {
        &self.inner.source
    }

    pub fn policy(&self) -> CachePolicy {
        self.inner.policy
    }

    /// Counter bumped on every change a renderer could observe.
    pub fn generation(&self) -> u64 {
        self.inner.generation.load(Ordering::Acquire)
    }

    /// Snapshot of the league list, starting a fetch if there is no data or
    /// the data is stale.
    pub fn leagues(&self) -> QueryState<Vec<League>> {
        self.acquire_leagues(FetchMode::Auto).state
    }

    /// Manual retry. Clears the error and runs the whole fetch and retry
    /// cycle, even if the data is still fresh.
    pub fn refetch_leagues(&self) -> QueryState<Vec<League>> {
        self.acquire_leagues(FetchMode::Force).state
    }

    /// Awaits the league list through the cache.
    ///
    /// Fresh data is returned without a request. An entry that is in its
    /// error state is fetched again.
    pub async fn fetch_leagues(&self) -> QueryResult<Vec<League>> {
        let acquired = self.acquire_leagues(FetchMode::Auto);
        resolve(acquired, || self.acquire_leagues(FetchMode::Force)).await
    }

    /// Badge snapshot for `league_id`. Nothing is fetched unless `enabled`.
    pub fn badge(&self, league_id: &str, enabled: bool) -> BadgeState {
        if !enabled {
            return self.inner.badges.peek(&QueryKey::badge(league_id)).into();
        }
        self.acquire_badge(league_id, FetchMode::Auto).state.into()
    }

    /// Awaits the badge for `league_id` through the cache.
    pub async fn fetch_badge(&self, league_id: &str) -> Result<Option<SeasonBadge>, QueryError> {
        let acquired = self.acquire_badge(league_id, FetchMode::Auto);
        let badge = resolve(acquired, || self.acquire_badge(league_id, FetchMode::Force)).await?;
        Ok((*badge).clone())
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            league_cache: self.inner.leagues.info(),
            badge_cache: self.inner.badges.info(),
        }
    }

    /// Drops every entry. Requests in flight still complete into the cache.
    pub fn clear(&self) {
        self.inner.leagues.clear();
        self.inner.badges.clear();
        self.inner.bump_generation();
        info!("Cleared all query caches");
    }

    fn evict_idle(&self, now: Instant) {
        let idle = self.inner.policy.idle_eviction;
        let evicted = self.inner.leagues.evict_idle(now, idle) + self.inner.badges.evict_idle(now, idle);
        if evicted > 0 {
            debug!("Evicted {} idle cache entries", evicted);
        }
    }

    fn acquire_leagues(&self, mode: FetchMode) -> Acquired<Vec<League>> {
        let now = Instant::now();
        self.evict_idle(now);

        let inner = Arc::clone(&self.inner);
        let acquired = self.inner.leagues.acquire(
            &QueryKey::Leagues,
            now,
            mode,
            self.inner.policy.stale_time,
            move || {
                async move {
                    let result = fetch_leagues_with_retry(&inner.source).await;
                    inner
                        .leagues
                        .complete(&QueryKey::Leagues, &result, Instant::now());
                    inner.bump_generation();
                    result
                }
                .boxed()
            },
        );

        self.drive(&acquired);
        acquired
    }

    fn acquire_badge(&self, league_id: &str, mode: FetchMode) -> Acquired<Option<SeasonBadge>> {
        let now = Instant::now();
        self.evict_idle(now);

        let key = QueryKey::badge(league_id);
        let inner = Arc::clone(&self.inner);
        let request_key = key.clone();
        let league_id = league_id.to_string();
        let acquired = self.inner.badges.acquire(
            &key,
            now,
            mode,
            self.inner.policy.stale_time,
            move || {
                async move {
                    let result = fetch_badge_once(&inner.source, &league_id).await;
                    inner.badges.complete(&request_key, &result, Instant::now());
                    inner.bump_generation();
                    result
                }
                .boxed()
            },
        );

        self.drive(&acquired);
        acquired
    }

    /// Spawns a newly started request so it makes progress even when no
    /// caller awaits it.
    fn drive<T: Send + Sync + 'static>(&self, acquired: &Acquired<T>) {
        if !acquired.started {
            return;
        }
        self.inner.bump_generation();
        if let Some(in_flight) = acquired.in_flight.clone() {
            tokio::spawn(in_flight);
        }
    }
}

/// Awaits the request a caller joined or started. Without one, cached data
/// is returned, and an entry in its error state gets a forced fetch.
async fn resolve<T, F>(acquired: Acquired<T>, force: F) -> QueryResult<T>
where
    F: FnOnce() -> Acquired<T>,
{
    if let Some(in_flight) = acquired.in_flight {
        return in_flight.await;
    }
    if let Some(data) = acquired.state.data {
        return Ok(data);
    }
    match force().in_flight {
        Some(in_flight) => in_flight.await,
        None => Err(QueryError::fetch_failed("request could not be started")),
    }
}

/// Fetches the league list, retrying every failure up to
/// [`retry::MAX_RETRIES`] times with [`retry_delay`] between attempts.
#[instrument(skip(source))]
async fn fetch_leagues_with_retry<S: CatalogSource>(source: &S) -> QueryResult<Vec<League>> {
    let mut attempt = 0;
    loop {
        match source.fetch_leagues().await {
            Ok(leagues) => {
                info!(
                    "League list loaded: leagues={}, attempts={}",
                    leagues.len(),
                    attempt + 1
                );
                return Ok(Arc::new(leagues));
            }
            Err(e) if attempt < retry::MAX_RETRIES => {
                let delay = retry_delay(attempt);
                warn!(
                    "League list fetch failed (attempt {}/{}), retrying in {:?}: {}",
                    attempt + 1,
                    retry::MAX_RETRIES + 1,
                    delay,
                    e
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                error!(
                    "League list fetch failed after {} attempts: {}",
                    attempt + 1,
                    e
                );
                return Err(QueryError::from(&e));
            }
        }
    }
}

#[instrument(skip(source))]
async fn fetch_badge_once<S: CatalogSource>(
    source: &S,
    league_id: &str,
) -> QueryResult<Option<SeasonBadge>> {
    match source.fetch_season_badge(league_id).await {
        Ok(badge) => Ok(Arc::new(badge)),
        Err(e) => {
            warn!("Season badge fetch failed for league {}: {}", league_id, e);
            Err(QueryError::from(&e))
        }
    }
}
