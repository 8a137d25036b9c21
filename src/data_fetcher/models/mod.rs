pub mod badge;
mod common;
pub mod league;

pub use badge::{SeasonBadge, SeasonsResponse};
pub use league::{League, LeaguesResponse};
