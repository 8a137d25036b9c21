pub mod api;
pub mod cache;
pub mod models;

pub use api::{CatalogSource, HttpCatalogSource};
pub use cache::{BadgeState, QueryClient, QueryState};
pub use models::{League, SeasonBadge};
