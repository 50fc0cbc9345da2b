//! Cache Store Module
//!
//! Main cache engine combining a concurrently-readable value index with a
//! token-ordered recency index and LRU eviction.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, trace};

use crate::builder::CacheBuilder;
use crate::cache::{CacheEntry, CacheStats, RecencyIndex, StatsSnapshot, TokenMinter};
use crate::error::{CacheError, Result};

// == Eviction Callback ==
/// Caller-supplied hook invoked synchronously with the `(key, value)` of
/// every entry removed by the eviction step.
///
/// The callback runs inside the serialized writer: a slow or blocking
/// callback stalls all subsequent mutations on the cache instance. Callers
/// needing heavy work should hand it off to their own executor.
pub type EvictionCallback<K, V> = Arc<dyn Fn(&K, &V) + Send + Sync>;

// == Cache ==
/// A bounded key/value cache with least-recently-used eviction.
///
/// The cache keeps two cooperating indices:
/// - a **value index** (`DashMap`) mapping key -> (recency token, value),
///   readable concurrently from any thread without taking a lock;
/// - a **recency index** (`BTreeMap` behind a `tokio::sync::Mutex`) mapping
///   token -> key in ascending token order, so the least-recently-touched
///   key is the minimum entry.
///
/// All mutations are serialized through the mutex; between operations the
/// two indices are in bijection and hold at most `capacity` entries.
///
/// Pure reads ([`peek`](Cache::peek), [`contains`](Cache::contains),
/// [`len`](Cache::len)) bypass the writer entirely. They observe a
/// consistent snapshot per key but may race arbitrarily with an in-flight
/// mutation; there is no cross-key linearizability guarantee.
pub struct Cache<K, V> {
    /// Key -> (token, value); the concurrently-readable index
    values: DashMap<K, CacheEntry<V>>,
    /// Token -> key; owned by the serialized writer
    recency: Mutex<RecencyIndex<K>>,
    /// Mints strictly increasing recency tokens
    minter: TokenMinter,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Optional hook observing every eviction
    evict_fn: Option<EvictionCallback<K, V>>,
    /// Performance statistics
    stats: CacheStats,
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a cache holding at most `capacity` entries, with no eviction
    /// callback.
    ///
    /// Fails fast with [`CacheError::InvalidCapacity`] when `capacity == 0`.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_eviction_callback(capacity, None)
    }

    /// Returns a [`CacheBuilder`] for configuring a cache.
    pub fn builder(capacity: usize) -> CacheBuilder<K, V> {
        CacheBuilder::new(capacity)
    }

    pub(crate) fn with_eviction_callback(
        capacity: usize,
        evict_fn: Option<EvictionCallback<K, V>>,
    ) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }

        Ok(Self {
            values: DashMap::new(),
            recency: Mutex::new(RecencyIndex::new()),
            minter: TokenMinter::new(),
            capacity,
            evict_fn,
            stats: CacheStats::new(),
        })
    }

    // == Writer Lock ==
    /// Acquires the serialized writer, waiting at most `timeout`.
    ///
    /// On timeout the lock future is dropped before acquisition, so the
    /// failed call leaves no partial mutation behind.
    async fn lock_writer(&self, timeout: Duration) -> Result<MutexGuard<'_, RecencyIndex<K>>> {
        tokio::time::timeout(timeout, self.recency.lock())
            .await
            .map_err(|_| CacheError::Timeout(timeout))
    }

    // == Put ==
    /// Inserts or replaces the value for `key`.
    ///
    /// Replacing an existing key discards its old recency token. After the
    /// insert the eviction step runs, so the call may synchronously evict
    /// (and report via the callback) a different key.
    pub async fn put(&self, key: K, value: V, timeout: Duration) -> Result<()> {
        let mut recency = self.lock_writer(timeout).await?;

        self.insert_locked(&mut recency, key, value);
        self.evict_overflow(&mut recency);

        Ok(())
    }

    /// Writes both indices for an insert-or-replace. Caller holds the writer.
    fn insert_locked(&self, recency: &mut RecencyIndex<K>, key: K, value: V) {
        let token = self.minter.mint();
        recency.insert(token, key.clone());

        // On replace, retire the old token so the key keeps exactly one
        // recency entry.
        if let Some(old) = self.values.insert(key, CacheEntry::new(token, value)) {
            recency.remove(old.token);
        }

        trace!(token, "inserted entry");
    }

    // == Eviction Step ==
    /// Removes oldest-first until the cache is back within capacity.
    ///
    /// `put` grows the cache by at most one entry, but the loop tolerates
    /// larger overshoot. Both index removals complete before the callback
    /// runs, so a panicking callback propagates to the `put` caller with
    /// the entry already evicted and the indices in sync.
    fn evict_overflow(&self, recency: &mut RecencyIndex<K>) {
        while self.values.len() > self.capacity {
            let Some((token, key)) = recency.pop_oldest() else {
                break;
            };
            let Some((key, entry)) = self.values.remove(&key) else {
                continue;
            };

            self.stats.record_eviction();
            debug!(
                evicted_token = token,
                remaining = self.values.len(),
                "capacity exceeded, evicted least recently used entry"
            );

            if let Some(evict_fn) = &self.evict_fn {
                evict_fn(&key, &entry.value);
            }
        }
    }

    // == Get ==
    /// Returns the value for `key`, marking it most recently used.
    ///
    /// The touch re-mints the key's recency token, so this is a mutating
    /// operation and serializes like [`put`](Cache::put). For a read that
    /// leaves recency order untouched, use [`peek`](Cache::peek).
    pub async fn get(&self, key: &K, timeout: Duration) -> Result<Option<V>> {
        let mut recency = self.lock_writer(timeout).await?;

        let Some(mut entry) = self.values.get_mut(key) else {
            self.stats.record_miss();
            return Ok(None);
        };

        let token = self.minter.mint();
        recency.remove(entry.token);
        recency.insert(token, key.clone());
        entry.token = token;

        self.stats.record_hit();
        trace!(token, "touched entry on read");
        Ok(Some(entry.value.clone()))
    }

    // == Peek ==
    /// Returns the value for `key` without touching it.
    ///
    /// Pure read: bypasses the serialized writer, never affects recency
    /// order, and may run concurrently with an in-flight mutation.
    pub fn peek(&self, key: &K) -> Option<V> {
        match self.values.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Update ==
    /// Replaces the value of an *existing* key in place.
    ///
    /// If `key` is absent this is a no-op that still returns `Ok(())` — no
    /// insertion occurs. This asymmetry with [`put`](Cache::put) is the
    /// documented contract, not upsert semantics: callers are expected to
    /// know the key exists, and those expecting upsert behavior should use
    /// `put` instead.
    ///
    /// With `touch = true` the key is also marked most recently used; with
    /// `touch = false` the stored value changes but eviction order does not.
    pub async fn update(&self, key: &K, value: V, touch: bool, timeout: Duration) -> Result<()> {
        let mut recency = self.lock_writer(timeout).await?;

        let Some(mut entry) = self.values.get_mut(key) else {
            return Ok(());
        };

        entry.value = value;
        if touch {
            let token = self.minter.mint();
            recency.remove(entry.token);
            recency.insert(token, key.clone());
            entry.token = token;
        }

        Ok(())
    }

    // == Remove ==
    /// Removes `key` from both indices if present; no-op if absent.
    ///
    /// Idempotent, always returns `Ok(())` on lock acquisition. Removals
    /// are deletions, not evictions: the eviction callback is never invoked.
    pub async fn remove(&self, key: &K, timeout: Duration) -> Result<()> {
        let mut recency = self.lock_writer(timeout).await?;

        if let Some((_, entry)) = self.values.remove(key) {
            recency.remove(entry.token);
            trace!(token = entry.token, "removed entry");
        }

        Ok(())
    }

    // == Get Or Compute ==
    /// Returns the value for `key`, computing and storing it on a miss.
    ///
    /// On a hit the stored value is returned unchanged, `compute` is never
    /// invoked and recency order is untouched. On a miss, `compute(key)`
    /// runs; `Some(value)` is stored via [`put`](Cache::put) and returned,
    /// `None` is returned without inserting anything.
    ///
    /// The absence check and the insert are *not* one atomic step: two
    /// callers racing to fill the same key may both compute, and the later
    /// `put` wins. Each `put` itself remains atomic, so this is an accepted
    /// last-write-wins race rather than a consistency violation.
    pub async fn get_or_compute<F>(&self, key: &K, compute: F, timeout: Duration) -> Result<Option<V>>
    where
        F: FnOnce(&K) -> Option<V>,
    {
        if let Some(value) = self.peek(key) {
            return Ok(Some(value));
        }

        match compute(key) {
            Some(value) => {
                self.put(key.clone(), value.clone(), timeout).await?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    // == Contains ==
    /// Checks whether `key` is present. Pure read, no touch.
    pub fn contains(&self, key: &K) -> bool {
        self.values.contains_key(key)
    }

    // == Length ==
    /// Returns the current number of entries. Pure read.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty. Pure read.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    // == Capacity ==
    /// Returns the configured capacity bound.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Stats ==
    /// Returns a snapshot of the performance counters.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot(self.values.len())
    }
}

#[cfg(test)]
impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    V: Clone,
{
    /// Asserts the bijection between the value and recency indices.
    pub(crate) async fn assert_indices_consistent(&self) {
        let recency = self.recency.lock().await;

        assert_eq!(
            recency.len(),
            self.values.len(),
            "index sizes diverged: recency={} values={}",
            recency.len(),
            self.values.len()
        );
        assert!(
            self.values.len() <= self.capacity,
            "cache oversized: {} > {}",
            self.values.len(),
            self.capacity
        );

        for item in self.values.iter() {
            assert_eq!(
                recency.get(item.token),
                Some(item.key()),
                "value-index token {} has no matching recency entry",
                item.token
            );
        }
    }
}
