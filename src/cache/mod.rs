//! Cache Module
//!
//! Provides the in-memory response cache with TTL expiration and LRU eviction.

mod entry;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::{CacheStore, DEFAULT_CAPACITY, DEFAULT_TTL};
