//! Application-wide constants and configuration values
//!
//! This module centralizes all magic numbers and configuration constants
//! to improve maintainability and make the codebase more configurable.

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of idle connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Public TheSportsDB v1 endpoint using the free test key
pub const DEFAULT_API_BASE_URL: &str = "https://www.thesportsdb.com/api/v1/json/3";

/// File name used for the log file when no custom path is configured
pub const DEFAULT_LOG_FILE_NAME: &str = "league_browser.log";

/// Cache freshness and eviction windows
pub mod cache_ttl {
    /// Data younger than this is served without a network call (5 minutes)
    pub const STALE_SECONDS: u64 = 300;

    /// Entries unused for this long are evicted (10 minutes)
    pub const IDLE_EVICTION_SECONDS: u64 = 600;

    /// Upper bound on cached badge entries
    pub const BADGE_CAPACITY: usize = 512;
}

/// Retry configuration for the league list
pub mod retry {
    /// Number of retries after the first failed attempt
    pub const MAX_RETRIES: u32 = 3;

    /// Base delay for exponential backoff (milliseconds)
    pub const BASE_DELAY_MS: u64 = 1000;

    /// Maximum delay between retries (seconds)
    pub const MAX_DELAY_SECONDS: u64 = 30;
}

/// UI polling intervals in milliseconds
pub mod polling {
    /// Polling interval for active use (< 5 seconds idle)
    pub const ACTIVE_MS: u64 = 50;

    /// Polling interval for semi-active use (5-30 seconds idle)
    pub const SEMI_ACTIVE_MS: u64 = 200;

    /// Polling interval for idle use (> 30 seconds idle)
    pub const IDLE_MS: u64 = 500;

    /// Threshold for considering user as idle (seconds)
    pub const IDLE_THRESHOLD_SECONDS: u64 = 30;

    /// Threshold for considering user as semi-active (seconds)
    pub const SEMI_ACTIVE_THRESHOLD_SECONDS: u64 = 5;
}

/// UI layout and timing constants
pub mod ui {
    /// Delay between the last keystroke and applying the search text
    pub const SEARCH_DEBOUNCE_MS: u64 = 300;

    /// Number of placeholder cards shown while the catalog loads
    pub const SKELETON_CARDS: usize = 12;

    /// Lines per card including borders
    pub const CARD_HEIGHT: usize = 6;

    /// Horizontal gap between cards
    pub const CARD_GAP: usize = 2;

    /// Terminals narrower than this get a single card column
    pub const SINGLE_COLUMN_MAX_WIDTH: u16 = 80;

    /// Terminals narrower than this get two card columns
    pub const DOUBLE_COLUMN_MAX_WIDTH: u16 = 120;

    /// Width of the badge modal box
    pub const MODAL_WIDTH: usize = 56;

    /// Height of the badge modal box
    pub const MODAL_HEIGHT: usize = 11;

    /// Rows used by the title, controls, summary and footer
    pub const CHROME_ROWS: usize = 6;

    /// Width used when rendering without a terminal
    pub const DEFAULT_WIDTH: u16 = 100;

    /// Height used when rendering without a terminal
    pub const DEFAULT_HEIGHT: u16 = 40;
}

/// Environment variable names
pub mod env_vars {
    /// Environment variable for API base URL override
    pub const API_BASE_URL: &str = "LEAGUE_BROWSER_API_BASE_URL";

    /// Environment variable for log file path override
    pub const LOG_FILE: &str = "LEAGUE_BROWSER_LOG_FILE";

    /// Environment variable for HTTP timeout override in seconds
    pub const HTTP_TIMEOUT: &str = "LEAGUE_BROWSER_HTTP_TIMEOUT";
}
