//! URL building utilities for API endpoints

use reqwest::Url;

use crate::error::AppError;

/// Builds the URL of the full league catalog.
///
/// # Example
/// ```
/// use league_browser::data_fetcher::api::build_leagues_url;
///
/// let url = build_leagues_url("https://www.thesportsdb.com/api/v1/json/3");
/// assert_eq!(url, "https://www.thesportsdb.com/api/v1/json/3/all_leagues.php");
/// ```
pub fn build_leagues_url(api_base_url: &str) -> String {
    format!("{}/all_leagues.php", api_base_url.trim_end_matches('/'))
}

/// Builds the URL of the season list (with badges) for one league.
///
/// Query parameters are form-encoded, so an arbitrary league id cannot
/// inject extra parameters.
///
/// # Example
/// ```
/// use league_browser::data_fetcher::api::build_season_badge_url;
///
/// let url = build_season_badge_url("https://www.thesportsdb.com/api/v1/json/3", "4328").unwrap();
/// assert_eq!(
///     url.as_str(),
///     "https://www.thesportsdb.com/api/v1/json/3/search_all_seasons.php?badge=1&id=4328"
/// );
/// ```
pub fn build_season_badge_url(api_base_url: &str, league_id: &str) -> Result<Url, AppError> {
    let endpoint = format!(
        "{}/search_all_seasons.php",
        api_base_url.trim_end_matches('/')
    );
    Url::parse_with_params(&endpoint, &[("badge", "1"), ("id", league_id)]).map_err(|e| {
        AppError::config_error(format!("Invalid API base URL '{api_base_url}': {e}"))
    })
}
