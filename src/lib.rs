//! Shared LRU - an embeddable, bounded key/value cache
//!
//! Provides least-recently-used eviction with lock-free concurrent reads,
//! serialized mutations with caller-specified timeouts, get-or-compute
//! semantics, and a synchronous eviction notification hook.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use shared_lru::Cache;
//!
//! # tokio_test::block_on(async {
//! let cache: Cache<String, String> = Cache::new(2).unwrap();
//! let timeout = Duration::from_secs(1);
//!
//! cache.put("a".into(), "1".into(), timeout).await.unwrap();
//! cache.put("b".into(), "2".into(), timeout).await.unwrap();
//!
//! // Touching "a" makes "b" the eviction candidate.
//! cache.get(&"a".to_string(), timeout).await.unwrap();
//! cache.put("c".into(), "3".into(), timeout).await.unwrap();
//!
//! assert!(cache.contains(&"a".to_string()));
//! assert!(!cache.contains(&"b".to_string()));
//! # });
//! ```

pub mod builder;
pub mod cache;
pub mod error;

pub use builder::CacheBuilder;
pub use cache::{Cache, EvictionCallback, StatsSnapshot};
pub use error::{CacheError, Result};
