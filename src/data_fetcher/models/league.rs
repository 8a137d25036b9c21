use super::common::{blank_as_none, null_as_empty};
use serde::{Deserialize, Serialize};

/// A league from the catalog. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct League {
    #[serde(rename = "idLeague")]
    pub id: String,
    #[serde(rename = "strLeague", default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(
        rename = "strLeagueAlternate",
        default,
        deserialize_with = "blank_as_none"
    )]
    pub alternate_name: Option<String>,
    #[serde(rename = "strSport", default, deserialize_with = "null_as_empty")]
    pub sport: String,
}

impl League {
    pub fn new(id: impl Into<String>, name: impl Into<String>, sport: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            alternate_name: None,
            sport: sport.into(),
        }
    }

    pub fn with_alternate_name(mut self, alternate_name: impl Into<String>) -> Self {
        let alternate_name = alternate_name.into();
        self.alternate_name = (!alternate_name.trim().is_empty()).then_some(alternate_name);
        self
    }

    /// Alternate name worth showing next to the name: present and not a
    /// repeat of the name itself.
    pub fn display_alternate_name(&self) -> Option<&str> {
        self.alternate_name
            .as_deref()
            .filter(|alternate| *alternate != self.name)
    }
}

/// Response body of `all_leagues.php`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaguesResponse {
    #[serde(default)]
    pub leagues: Option<Vec<League>>,
}

impl LeaguesResponse {
    /// The catalog, with a `null` list read as empty.
    pub fn into_leagues(self) -> Vec<League> {
        self.leagues.unwrap_or_default()
    }
}
