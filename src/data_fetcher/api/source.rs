//! The remote catalog as seen by the query cache.

use std::future::Future;

use reqwest::Client;
use tracing::{debug, info, instrument};

use super::fetch_utils::fetch;
use super::http_client::create_http_client_with_timeout;
use super::urls::{build_leagues_url, build_season_badge_url};
use crate::config::Config;
use crate::data_fetcher::models::{League, LeaguesResponse, SeasonBadge, SeasonsResponse};
use crate::error::AppError;

/// Where leagues and season badges come from.
///
/// The query cache is generic over this trait so tests can drive it with an
/// in-memory source that counts calls and scripts failures.
pub trait CatalogSource: Send + Sync + 'static {
    /// Fetches the full league catalog in one request.
    fn fetch_leagues(&self) -> impl Future<Output = Result<Vec<League>, AppError>> + Send;

    /// Fetches the first season badge for `league_id`. `Ok(None)` means the
    /// league has no season records.
    fn fetch_season_badge(
        &self,
        league_id: &str,
    ) -> impl Future<Output = Result<Option<SeasonBadge>, AppError>> + Send;
}

/// [`CatalogSource`] backed by the TheSportsDB HTTP API.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: Client,
    api_base_url: String,
}

impl HttpCatalogSource {
    pub fn new(client: Client, api_base_url: impl Into<String>) -> Self {
        Self {
            client,
            api_base_url: api_base_url.into(),
        }
    }

    /// Builds a source with an HTTP client configured from `config`.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
        Ok(Self::new(client, config.api_base_url.clone()))
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }
}

impl CatalogSource for HttpCatalogSource {
    #[instrument(skip(self))]
    async fn fetch_leagues(&self) -> Result<Vec<League>, AppError> {
        let url = build_leagues_url(&self.api_base_url);
        let response: LeaguesResponse = fetch(&self.client, &url).await?;
        let leagues = response.into_leagues();
        info!("Fetched {} leagues", leagues.len());
        Ok(leagues)
    }

    #[instrument(skip(self))]
    async fn fetch_season_badge(&self, league_id: &str) -> Result<Option<SeasonBadge>, AppError> {
        let url = build_season_badge_url(&self.api_base_url, league_id)?;
        let response: SeasonsResponse = fetch(&self.client, url.as_str()).await?;
        let badge = response.into_first_badge();
        debug!(
            "Season badge for league {}: {:?}",
            league_id,
            badge.as_ref().map(|b| b.season.as_str())
        );
        Ok(badge)
    }
}
