//! Cache Module
//!
//! Provides the dual-index LRU cache engine: a concurrently-readable value
//! index, a token-ordered recency index, and the serialized controller that
//! keeps the two in bijection while enforcing the capacity bound.

mod entry;
mod recency;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use recency::{RecencyIndex, TokenMinter};
pub use stats::{CacheStats, StatsSnapshot};
pub use store::{Cache, EvictionCallback};
