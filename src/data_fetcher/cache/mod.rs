pub mod client;
mod store;
pub mod types;

// Re-export the query client
pub use client::QueryClient;
// Re-export cache types
pub use types::{BadgeState, CacheInfo, CachePolicy, CacheStats, QueryKey, QueryState};
