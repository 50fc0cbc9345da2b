//! Error types for the shared LRU cache
//!
//! Provides unified error handling using thiserror.

use std::time::Duration;

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
///
/// A missing key is never an error: lookups return `Option` and removals of
/// absent keys are no-ops. Errors are reserved for timeouts on the
/// serialized writer and for construction-time misconfiguration.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The serialized writer could not be acquired within the caller's
    /// timeout. No state change occurred; the call may be retried.
    #[error("timed out after {0:?} waiting for the cache writer")]
    Timeout(Duration),

    /// The requested capacity cannot hold any entries.
    #[error("invalid capacity {0}: must be at least 1")]
    InvalidCapacity(usize),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
