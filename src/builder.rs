//! Builder Module
//!
//! Handles cache configuration at construction time.

use std::hash::Hash;
use std::sync::Arc;

use crate::cache::{Cache, EvictionCallback};
use crate::error::Result;

/// Builder for configuring a [`Cache`].
///
/// # Example
///
/// ```
/// use shared_lru::Cache;
///
/// let cache: shared_lru::Cache<String, u64> = Cache::builder(1000)
///     .eviction_callback(|key, value| {
///         println!("evicted {key} = {value}");
///     })
///     .build()
///     .unwrap();
/// ```
pub struct CacheBuilder<K, V> {
    capacity: usize,
    evict_fn: Option<EvictionCallback<K, V>>,
}

impl<K, V> CacheBuilder<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a new builder with the given capacity in entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            evict_fn: None,
        }
    }

    /// Sets a callback invoked synchronously with the `(key, value)` of
    /// every entry removed by the eviction step.
    ///
    /// The callback runs inside the serialized writer; keep it fast or
    /// dispatch the work elsewhere, since it stalls all other mutations on
    /// the instance while it runs.
    pub fn eviction_callback<F>(mut self, evict_fn: F) -> Self
    where
        F: Fn(&K, &V) + Send + Sync + 'static,
    {
        self.evict_fn = Some(Arc::new(evict_fn));
        self
    }

    /// Builds the cache with the configured settings.
    ///
    /// Fails fast with [`CacheError::InvalidCapacity`](crate::CacheError)
    /// when the capacity is zero; a misconfigured cache never starts.
    pub fn build(self) -> Result<Cache<K, V>> {
        Cache::with_eviction_callback(self.capacity, self.evict_fn)
    }
}
