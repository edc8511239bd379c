//! Configuration Module
//!
//! Handles loading requester configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::{DEFAULT_CAPACITY, DEFAULT_TTL};
use crate::error::{RequestError, Result};

/// Default overall timeout for one request
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default interval between expired-entry sweeps
pub const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Requester configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of cached responses
    pub cache_capacity: usize,
    /// Lifetime of a cached response
    pub cache_ttl: Duration,
    /// Overall timeout of a single request, connect included
    pub request_timeout: Duration,
    /// Interval of the background expired-entry sweep
    pub cleanup_interval: Duration,
    /// User-Agent sent with every request
    pub user_agent: String,
}

impl Config {
    /// Loads the configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `HTTP_CACHE_CAPACITY` - Maximum cached responses (default: 64)
    /// - `HTTP_CACHE_TTL` - Cache TTL in seconds, fractions allowed (default: 7200)
    /// - `HTTP_TIMEOUT` - Request timeout in seconds, fractions allowed (default: 30)
    /// - `HTTP_CLEANUP_INTERVAL` - Sweep interval in seconds (default: 60)
    /// - `HTTP_USER_AGENT` - User-Agent header (default: `Sleepy-Bot/<version>`)
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            cache_capacity: parse(&lookup, "HTTP_CACHE_CAPACITY").unwrap_or(defaults.cache_capacity),
            cache_ttl: seconds(&lookup, "HTTP_CACHE_TTL").unwrap_or(defaults.cache_ttl),
            request_timeout: seconds(&lookup, "HTTP_TIMEOUT").unwrap_or(defaults.request_timeout),
            cleanup_interval: seconds(&lookup, "HTTP_CLEANUP_INTERVAL")
                .unwrap_or(defaults.cleanup_interval),
            user_agent: lookup("HTTP_USER_AGENT")
                .filter(|ua| !ua.trim().is_empty())
                .unwrap_or(defaults.user_agent),
        }
    }

    // == Validate ==
    /// Rejects zero capacity or zero durations.
    pub fn validate(&self) -> Result<()> {
        if self.cache_capacity == 0 {
            return Err(RequestError::InvalidConfiguration(
                "cache capacity must be greater than zero".to_string(),
            ));
        }

        let durations = [
            ("cache ttl", self.cache_ttl),
            ("request timeout", self.request_timeout),
            ("cleanup interval", self.cleanup_interval),
        ];
        for (name, value) in durations {
            if value.is_zero() {
                return Err(RequestError::InvalidConfiguration(format!(
                    "{name} must be greater than zero"
                )));
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CAPACITY,
            cache_ttl: DEFAULT_TTL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
            user_agent: concat!("Sleepy-Bot/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

fn parse<T: FromStr>(lookup: impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    lookup(name).and_then(|v| v.trim().parse().ok())
}

/// Non-negative, finite seconds; anything else is treated as unset.
fn seconds(lookup: impl Fn(&str) -> Option<String>, name: &str) -> Option<Duration> {
    parse::<f64>(lookup, name).and_then(|secs| Duration::try_from_secs_f64(secs).ok())
}
