//! Cache Entry Module
//!
//! Defines the structure for individual cache entries.

// == Cache Entry ==
/// A single cache entry: the stored value plus the recency token minted when
/// the entry was last inserted or touched.
///
/// The token stored here always equals the most recent token minted for this
/// key; the matching `(token -> key)` pair lives in the recency index.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// Recency token from the last insert or touch
    pub token: u64,
    /// The stored value
    pub value: V,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry carrying a freshly minted token.
    pub fn new(token: u64, value: V) -> Self {
        Self { token, value }
    }
}
