//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::Instant;

// == Cache Entry ==
/// Represents a single cached response with its insertion metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Wall-clock insertion time, for reporting
    pub inserted_at: DateTime<Utc>,
    /// Monotonic expiration deadline
    pub expires_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry that expires `ttl` from now.
    pub fn new(value: V, ttl: Duration) -> Self {
        Self {
            value,
            inserted_at: Utc::now(),
            expires_at: Instant::now() + ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time is greater than or equal to
    /// its deadline, so it is visible only while `now - inserted < ttl`.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, saturating at zero.
    #[cfg(test)]
    pub(crate) fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}
