//! Sports league catalog browser library
//!
//! This library fetches the TheSportsDB league catalog through a caching,
//! deduplicating query client, filters it by search text and sport, and
//! renders it as a card grid in the terminal.
//!
//! # Examples
//!
//! ```rust,no_run
//! use league_browser::config::Config;
//! use league_browser::data_fetcher::{HttpCatalogSource, QueryClient};
//! use league_browser::error::AppError;
//! use league_browser::filter::FilterState;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let client = QueryClient::new(HttpCatalogSource::from_config(&config)?);
//!
//!     // Fetch the catalog once; later calls are served from the cache
//!     let leagues = client.fetch_leagues().await?;
//!
//!     let filter = FilterState::new("premier", "Soccer");
//!     for league in filter.apply(&leagues) {
//!         println!("{} [{}]", league.name, league.sport);
//!     }
//!
//!     if let Some(badge) = client.fetch_badge("4328").await? {
//!         println!("Season {}: {:?}", badge.season, badge.badge_image_url);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod catalog_ui;
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod error;
pub mod filter;
pub mod logging;
pub mod scheduling;
pub mod testing_utils;
pub mod ui;

// Re-export commonly used types for convenience
pub use config::Config;
pub use data_fetcher::cache::{BadgeState, CacheInfo, CachePolicy, CacheStats, QueryState};
pub use data_fetcher::models::{League, SeasonBadge};
pub use data_fetcher::{CatalogSource, HttpCatalogSource, QueryClient};
pub use error::{AppError, QueryError, QueryErrorKind};
pub use filter::{FilterState, filter_leagues, results_summary, unique_sports};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
