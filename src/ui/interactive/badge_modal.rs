//! Season badge modal state.
//!
//! The modal only remembers which league it is open for. Whether it shows a
//! spinner, a badge or "No badge available" is read from the query cache on
//! every frame (see [`crate::catalog_ui::ModalPhase`]), so closing and
//! reopening reuses whatever the cache holds.

use crate::data_fetcher::models::League;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BadgeModal {
    #[default]
    Closed,
    Open {
        league_id: String,
        league_name: String,
    },
}

impl BadgeModal {
    pub fn open(league: &League) -> Self {
        BadgeModal::Open {
            league_id: league.id.clone(),
            league_name: league.name.clone(),
        }
    }

    /// Closes the modal. Its fetch, if any, keeps running into the cache.
    pub fn close(&mut self) {
        *self = BadgeModal::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, BadgeModal::Open { .. })
    }

    /// League whose badge should be fetched. `None` while closed, which
    /// keeps the badge query disabled.
    pub fn league_id(&self) -> Option<&str> {
        match self {
            BadgeModal::Open { league_id, .. } => Some(league_id),
            BadgeModal::Closed => None,
        }
    }

    pub fn league_name(&self) -> Option<&str> {
        match self {
            BadgeModal::Open { league_name, .. } => Some(league_name),
            BadgeModal::Closed => None,
        }
    }
}
