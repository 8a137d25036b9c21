use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

use crate::data_fetcher::api::CatalogSource;
use crate::data_fetcher::models::{League, SeasonBadge};
use crate::error::AppError;

/// Test utilities for creating mock data and testing scenarios
pub struct TestDataBuilder;

impl TestDataBuilder {
    /// Creates a league without an alternate name
    pub fn league(id: &str, name: &str, sport: &str) -> League {
        League::new(id, name, sport)
    }

    /// A small catalog spanning several sports, in API order
    pub fn sample_leagues() -> Vec<League> {
        vec![
            League::new("4328", "English Premier League", "Soccer")
                .with_alternate_name("Premier League, EPL"),
            League::new("4387", "NBA", "Basketball")
                .with_alternate_name("National Basketball Association"),
            League::new("4335", "Spanish La Liga", "Soccer").with_alternate_name("LaLiga"),
            League::new("4391", "NFL", "American Football")
                .with_alternate_name("National Football League"),
            League::new("4380", "NHL", "Ice Hockey")
                .with_alternate_name("National Hockey League"),
            League::new("4424", "MLB", "Baseball").with_alternate_name("Major League Baseball"),
            League::new("4370", "Formula 1", "Motorsport").with_alternate_name("F1"),
            League::new("4346", "American Major League Soccer", "Soccer")
                .with_alternate_name("MLS"),
        ]
    }

    /// Creates `count` leagues cycling through three sports
    pub fn create_multiple_leagues(count: usize) -> Vec<League> {
        const SPORTS: [&str; 3] = ["Soccer", "Basketball", "Ice Hockey"];
        (0..count)
            .map(|i| {
                League::new(
                    (5000 + i).to_string(),
                    format!("Test League {}", i + 1),
                    SPORTS[i % SPORTS.len()],
                )
            })
            .collect()
    }

    /// Creates a season badge with an image URL derived from the season
    pub fn badge(season: &str) -> SeasonBadge {
        SeasonBadge {
            badge_image_url: Some(format!(
                "https://r2.thesportsdb.com/images/media/league/badge/{season}.png"
            )),
            season: season.to_string(),
        }
    }
}

/// In-memory [`CatalogSource`] that counts calls and scripts failures.
///
/// Unknown league ids have no seasons and resolve to no badge.
pub struct FakeCatalogSource {
    leagues: Vec<League>,
    badges: HashMap<String, SeasonBadge>,
    failing_badges: HashSet<String>,
    latency: Duration,
    league_failures: AtomicU32,
    league_calls: AtomicUsize,
    badge_calls: AtomicUsize,
    league_call_times: Mutex<Vec<Instant>>,
}

impl FakeCatalogSource {
    pub fn new(leagues: Vec<League>) -> Self {
        Self {
            leagues,
            badges: HashMap::new(),
            failing_badges: HashSet::new(),
            latency: Duration::ZERO,
            league_failures: AtomicU32::new(0),
            league_calls: AtomicUsize::new(0),
            badge_calls: AtomicUsize::new(0),
            league_call_times: Mutex::new(Vec::new()),
        }
    }

    /// The next `count` league fetches fail with a 503
    pub fn failing_leagues(self, count: u32) -> Self {
        self.set_league_failures(count);
        self
    }

    pub fn with_badge(mut self, league_id: &str, badge: SeasonBadge) -> Self {
        self.badges.insert(league_id.to_string(), badge);
        self
    }

    pub fn failing_badge(mut self, league_id: &str) -> Self {
        self.failing_badges.insert(league_id.to_string());
        self
    }

    /// Every request sleeps this long before answering
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn set_league_failures(&self, count: u32) {
        self.league_failures.store(count, Ordering::SeqCst);
    }

    pub fn league_calls(&self) -> usize {
        self.league_calls.load(Ordering::SeqCst)
    }

    pub fn badge_calls(&self) -> usize {
        self.badge_calls.load(Ordering::SeqCst)
    }

    /// When each league fetch started, in call order
    pub fn league_call_times(&self) -> Vec<Instant> {
        self.league_call_times
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl CatalogSource for FakeCatalogSource {
    async fn fetch_leagues(&self) -> Result<Vec<League>, AppError> {
        self.league_calls.fetch_add(1, Ordering::SeqCst);
        self.league_call_times
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Instant::now());
        self.simulate_latency().await;

        let should_fail = self
            .league_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if should_fail {
            return Err(AppError::api_server_error(
                503,
                "Service Unavailable",
                "fake://all_leagues.php",
            ));
        }
        Ok(self.leagues.clone())
    }

    async fn fetch_season_badge(&self, league_id: &str) -> Result<Option<SeasonBadge>, AppError> {
        self.badge_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        if self.failing_badges.contains(league_id) {
            return Err(AppError::network_timeout(format!(
                "fake://search_all_seasons.php?id={league_id}"
            )));
        }
        Ok(self.badges.get(league_id).cloned())
    }
}

/// Property testing utilities for the filter engine
pub struct PropertyTesting;

impl PropertyTesting {
    /// Checks that `filtered` is an order-preserving subsequence of `leagues`
    pub fn validate_subsequence(leagues: &[League], filtered: &[&League]) -> Result<(), String> {
        let mut remaining = leagues.iter();
        for league in filtered {
            if !remaining.any(|candidate| candidate == *league) {
                return Err(format!(
                    "League {} is out of order or not part of the input",
                    league.id
                ));
            }
        }
        Ok(())
    }

    /// Checks that every filtered league satisfies the search and sport
    /// predicates
    pub fn validate_matches(
        filtered: &[&League],
        search_text: &str,
        selected_sport: &str,
    ) -> Result<(), String> {
        let needle = search_text.to_lowercase();
        for league in filtered {
            let name_match = league.name.to_lowercase().contains(&needle);
            let alternate_match = league
                .alternate_name
                .as_deref()
                .is_some_and(|alternate| alternate.to_lowercase().contains(&needle));
            if !search_text.is_empty() && !name_match && !alternate_match {
                return Err(format!("League {} does not match '{}'", league.id, search_text));
            }
            if !selected_sport.is_empty() && league.sport != selected_sport {
                return Err(format!(
                    "League {} has sport '{}', expected '{}'",
                    league.id, league.sport, selected_sport
                ));
            }
        }
        Ok(())
    }
}
