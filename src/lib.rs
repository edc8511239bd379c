//! Sleepy HTTP - the caching HTTP requester behind the bot's commands
//!
//! Serializes outgoing requests, caches successful responses with TTL
//! expiration and LRU eviction, and maps failures onto typed errors.

pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod tasks;

pub use config::Config;
pub use error::{HttpError, RequestError, Result};
pub use http::{CachedRequester, RequestParams, ResponseBody};
pub use tasks::spawn_cleanup_task;
