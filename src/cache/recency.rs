//! Recency Index Module
//!
//! Implements recency-order tracking for LRU eviction.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

// == Token Minter ==
/// Mints monotonically increasing recency tokens.
///
/// Tokens are unique and totally ordered: a later mint always yields a
/// strictly greater token, even when mints race from multiple threads. Only
/// the ordering matters; the numeric magnitude carries no meaning.
#[derive(Debug, Default)]
pub struct TokenMinter {
    next: AtomicU64,
}

impl TokenMinter {
    /// Creates a minter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next token. Safe to call concurrently.
    pub fn mint(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }
}

// == Recency Index ==
/// Tracks which key was touched least recently.
///
/// Keys are stored under their recency token in a `BTreeMap`, so the
/// minimum token is always the least-recently-touched key and can be found
/// in O(log n) without scanning all entries.
///
/// Invariant (maintained by the cache controller): this index is in
/// bijection with the value index — every `(key, token)` pair present in
/// one has its counterpart in the other.
#[derive(Debug, Default)]
pub struct RecencyIndex<K> {
    /// Token -> key, ordered ascending by token
    order: BTreeMap<u64, K>,
}

impl<K> RecencyIndex<K> {
    // == Constructor ==
    /// Creates a new empty recency index.
    pub fn new() -> Self {
        Self {
            order: BTreeMap::new(),
        }
    }

    // == Insert ==
    /// Records a key under a freshly minted token.
    pub fn insert(&mut self, token: u64, key: K) {
        self.order.insert(token, key);
    }

    // == Remove ==
    /// Removes the entry for a token, returning its key if present.
    pub fn remove(&mut self, token: u64) -> Option<K> {
        self.order.remove(&token)
    }

    // == Get ==
    /// Returns the key filed under a token, if any.
    pub fn get(&self, token: u64) -> Option<&K> {
        self.order.get(&token)
    }

    // == Pop Oldest ==
    /// Returns and removes the least-recently-touched entry.
    ///
    /// Returns None if the index is empty.
    pub fn pop_oldest(&mut self) -> Option<(u64, K)> {
        self.order.pop_first()
    }

    // == Peek Oldest ==
    /// Returns the least-recently-touched entry without removing it.
    pub fn peek_oldest(&self) -> Option<(&u64, &K)> {
        self.order.first_key_value()
    }

    // == Length ==
    /// Returns the number of tracked entries.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
