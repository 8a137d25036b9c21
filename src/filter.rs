//! Client-side search and sport filtering over the league catalog.
//!
//! Everything here is pure: no I/O and no clock. The UI derives its view
//! model from the cached catalog and the current [`FilterState`] on every
//! render.

use std::collections::BTreeSet;

use crate::data_fetcher::models::League;

/// What the user is filtering by. Empty strings mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_text: String,
    /// Exact sport name, or empty for all sports
    pub selected_sport: String,
}

impl FilterState {
    pub fn new(search_text: impl Into<String>, selected_sport: impl Into<String>) -> Self {
        Self {
            search_text: search_text.into(),
            selected_sport: selected_sport.into(),
        }
    }

    /// True when either the search or the sport narrows the catalog.
    pub fn is_active(&self) -> bool {
        !self.search_text.is_empty() || !self.selected_sport.is_empty()
    }

    pub fn clear(&mut self) {
        self.search_text.clear();
        self.selected_sport.clear();
    }

    pub fn apply<'a>(&self, leagues: &'a [League]) -> Vec<&'a League> {
        filter_leagues(leagues, &self.search_text, &self.selected_sport)
    }
}

/// Distinct non-empty sports, ascending. Comparison is case-sensitive, so
/// "soccer" and "Soccer" are two facets.
pub fn unique_sports(leagues: &[League]) -> Vec<String> {
    leagues
        .iter()
        .map(|league| league.sport.as_str())
        .filter(|sport| !sport.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Leagues matching both the search text and the sport, in input order.
///
/// The search matches a case-insensitive substring of the name or of the
/// alternate name. A league without an alternate name can only match on
/// its name. The sport must be equal exactly.
pub fn filter_leagues<'a>(
    leagues: &'a [League],
    search_text: &str,
    selected_sport: &str,
) -> Vec<&'a League> {
    let needle = search_text.to_lowercase();
    leagues
        .iter()
        .filter(|league| matches_search(league, &needle) && matches_sport(league, selected_sport))
        .collect()
}

fn matches_search(league: &League, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    league.name.to_lowercase().contains(needle)
        || league
            .alternate_name
            .as_deref()
            .is_some_and(|alternate| alternate.to_lowercase().contains(needle))
}

fn matches_sport(league: &League, selected_sport: &str) -> bool {
    selected_sport.is_empty() || league.sport == selected_sport
}

/// Line shown above the grid, e.g. "Showing 3 of 120 leagues".
pub fn results_summary(shown: usize, total: usize) -> String {
    if shown == total {
        format!("Showing all {total} leagues")
    } else {
        format!("Showing {shown} of {total} leagues")
    }
}
