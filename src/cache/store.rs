//! Cache Store Module
//!
//! Bounded key-value store combining per-entry TTL expiry with LRU eviction.
//! Pure in-memory state: no I/O and no locking, callers provide exclusion.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, LruTracker};
use crate::error::{RequestError, Result};

/// Default maximum number of entries
pub const DEFAULT_CAPACITY: usize = 64;

/// Default time to live (two hours)
pub const DEFAULT_TTL: Duration = Duration::from_secs(7200);

// == Cache Store ==
/// Response cache with LRU eviction and TTL expiry.
#[derive(Debug)]
pub struct CacheStore<V> {
    entries: HashMap<String, CacheEntry<V>>,
    lru: LruTracker,
    stats: CacheStats,
    capacity: usize,
    ttl: Duration,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store.
    ///
    /// # Errors
    /// `InvalidConfiguration` if `capacity` or `ttl` is zero.
    pub fn new(capacity: usize, ttl: Duration) -> Result<Self> {
        validate(capacity, ttl)?;

        Ok(Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            capacity,
            ttl,
        })
    }

    // == Get ==
    /// Returns a clone of the value if present and not expired.
    ///
    /// A hit marks the key as most recently used. An expired entry is removed
    /// and reported as a miss.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.remove_entry(key);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            return None;
        }

        self.stats.record_hit();
        self.lru.touch(key);
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    /// Checks whether a live entry exists without touching its recency.
    #[cfg(test)]
    pub(crate) fn contains_key(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired())
    }

    // == Set ==
    /// Inserts or overwrites a value, restarting its TTL.
    ///
    /// Expired entries are purged first; if the store is still over capacity
    /// afterwards, least recently used entries are evicted until it fits.
    pub fn set(&mut self, key: String, value: V) {
        self.cleanup_expired();

        self.entries
            .insert(key.clone(), CacheEntry::new(value, self.ttl));
        self.lru.touch(&key);

        while self.entries.len() > self.capacity {
            let Some(evicted) = self.lru.pop_least_recent() else {
                break;
            };
            self.entries.remove(&evicted);
            self.stats.record_eviction();
            debug!("Evicted {} from the cache", evicted);
        }
    }

    // == Reset ==
    /// Discards every entry and applies a new capacity and TTL.
    ///
    /// Arguments are validated before anything is touched, so a rejected
    /// reset leaves the current entries in place.
    pub fn reset(&mut self, capacity: usize, ttl: Duration) -> Result<()> {
        validate(capacity, ttl)?;

        self.entries.clear();
        self.lru.clear();
        self.stats = CacheStats::new();
        self.capacity = capacity;
        self.ttl = ttl;
        Ok(())
    }

    // == Cleanup Expired ==
    /// Removes all expired entries, returning how many were dropped.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.remove_entry(key);
        }

        self.stats.record_expirations(expired.len());
        expired.len()
    }

    // == Stats ==
    /// Returns a snapshot of the counters and the current settings.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            total_entries: self.entries.len(),
            capacity: self.capacity(),
            ttl_seconds: self.ttl().as_secs_f64(),
            ..self.stats.clone()
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn remove_entry(&mut self, key: &str) {
        self.entries.remove(key);
        self.lru.remove(key);
    }
}

fn validate(capacity: usize, ttl: Duration) -> Result<()> {
    if capacity == 0 {
        return Err(RequestError::InvalidConfiguration(
            "cache capacity must be greater than zero".to_string(),
        ));
    }
    if ttl.is_zero() {
        return Err(RequestError::InvalidConfiguration(
            "cache ttl must be greater than zero".to_string(),
        ));
    }
    Ok(())
}
