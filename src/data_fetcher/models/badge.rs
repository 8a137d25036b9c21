use super::common::{blank_as_none, null_as_empty};
use serde::{Deserialize, Serialize};

/// Seasonal metadata for a league, carrying the badge image URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeasonBadge {
    #[serde(rename = "strBadge", default, deserialize_with = "blank_as_none")]
    pub badge_image_url: Option<String>,
    #[serde(rename = "strSeason", default, deserialize_with = "null_as_empty")]
    pub season: String,
}

/// Response body of `search_all_seasons.php`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeasonsResponse {
    #[serde(default)]
    pub seasons: Option<Vec<SeasonBadge>>,
}

impl SeasonsResponse {
    /// Only the first season entry is consulted. Missing, `null` or empty
    /// `seasons` means there is no badge.
    pub fn into_first_badge(self) -> Option<SeasonBadge> {
        self.seasons.and_then(|seasons| seasons.into_iter().next())
    }
}
