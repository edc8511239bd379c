//! Cached Requester
//!
//! The public entry point: derives the cache key, serializes the whole
//! lookup/fetch/store sequence, classifies the status code and maps every
//! failure onto [`RequestError`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::Method;
use tracing::{debug, info, warn};

use crate::cache::{CacheStats, CacheStore};
use crate::config::Config;
use crate::error::{HttpError, RequestError, Result};
use crate::http::{
    cache_key, HttpTransport, RequestParams, RequestSerializer, ResponseBody, Transport,
    TransportRequest,
};

/// State only touched from inside the serializer's exclusive section.
#[derive(Debug)]
struct Session<T> {
    cache: CacheStore<ResponseBody>,
    /// `None` once the session has been closed
    transport: Option<T>,
}

// == Cached Requester ==
/// HTTP requester with an optional per-call response cache.
///
/// Construct one at startup and share it by reference (or `Arc`) with every
/// caller. Requests are admitted one at a time in arrival order, so identical
/// cached requests issued concurrently reach the network only once.
#[derive(Debug)]
pub struct CachedRequester<T = HttpTransport> {
    session: RequestSerializer<Session<T>>,
    closed: AtomicBool,
}

impl CachedRequester<HttpTransport> {
    // == Start ==
    /// Opens the pooled HTTP session.
    ///
    /// `headers` are sent with every request made through this requester.
    pub fn start(config: &Config, headers: HeaderMap) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::new(config, headers)?;
        let requester = Self::with_transport(transport, config.cache_capacity, config.cache_ttl)?;

        info!("Started a new HTTP requester session");
        Ok(requester)
    }
}

impl<T: Transport> CachedRequester<T> {
    /// Builds a requester around an existing transport.
    pub fn with_transport(transport: T, cache_capacity: usize, cache_ttl: Duration) -> Result<Self> {
        let cache = CacheStore::new(cache_capacity, cache_ttl)?;

        Ok(Self {
            session: RequestSerializer::new(Session {
                cache,
                transport: Some(transport),
            }),
            closed: AtomicBool::new(false),
        })
    }

    // == Request ==
    /// Performs a request, answering from the cache first when `cache` is set.
    ///
    /// Successful responses are decoded by content type and, if `cache` is
    /// set, stored under a key derived from method, URL and parameters.
    ///
    /// # Errors
    /// - `Http` for any status outside `200..300`; never cached. An error body
    ///   that does not match its content type is kept as raw bytes
    /// - `Transport` when no response was received (including timeouts)
    /// - `Decode` when a successful body does not match its content type
    /// - `SessionClosed` after [`close`](Self::close)
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        cache: bool,
        params: RequestParams,
    ) -> Result<ResponseBody> {
        let key = cache_key(&method, url, &params);
        let mut section = self.session.enter().await;
        let Session { cache: store, transport } = &mut *section;

        let Some(transport) = transport.as_ref() else {
            return Err(RequestError::SessionClosed);
        };

        if cache {
            if let Some(hit) = store.get(&key) {
                debug!("{} {} answered from the cache", method, url);
                return Ok(hit);
            }
        }

        let request = TransportRequest {
            method: &method,
            url,
            query: params.query_pairs(),
            options: &params.options,
        };
        let response = transport
            .call(request)
            .await
            .map_err(|source| RequestError::Transport {
                method: method.clone(),
                url: url.to_string(),
                source,
            })?;

        let status = response.status;

        if status.is_success() {
            let body = ResponseBody::decode(response.content_type(), response.body.clone())?;
            info!("{} {} succeeded with HTTP status code {}", method, url, status.as_u16());
            if cache {
                store.set(key, body.clone());
                debug!("{} {} inserted into the cache", method, url);
            }
            return Ok(body);
        }

        warn!("{} {} failed with HTTP status code {}", method, url, status.as_u16());
        // An error body that fails to decode is kept raw.
        let body = ResponseBody::decode(response.content_type(), response.body.clone())
            .unwrap_or_else(|_| ResponseBody::Bytes(response.body));
        Err(HttpError {
            method,
            url: response.url,
            status,
            reason: status.canonical_reason(),
            headers: response.headers,
            body,
        }
        .into())
    }

    /// Shorthand for a `GET` request.
    pub async fn get(&self, url: &str, cache: bool, params: RequestParams) -> Result<ResponseBody> {
        self.request(Method::GET, url, cache, params).await
    }

    // == Clear Cache ==
    /// Drops every cached response and applies a new capacity and TTL.
    ///
    /// Use [`DEFAULT_CAPACITY`](crate::cache::DEFAULT_CAPACITY) and
    /// [`DEFAULT_TTL`](crate::cache::DEFAULT_TTL) for the stock settings.
    /// Invalid arguments are rejected before anything is discarded.
    pub async fn clear_cache(&self, capacity: usize, ttl: Duration) -> Result<()> {
        let mut section = self.session.enter().await;
        section.cache.reset(capacity, ttl)?;

        info!(
            "Cleared cache; set the size to {} items and ttl to {} seconds",
            capacity,
            ttl.as_secs_f64()
        );
        Ok(())
    }

    /// Physically removes expired entries, returning how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        self.session.enter().await.cache.cleanup_expired()
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.session.enter().await.cache.stats()
    }

    // == Close ==
    /// Closes the session once every request queued before this call finished.
    ///
    /// Later requests fail with `SessionClosed`. Closing twice is a no-op.
    pub async fn close(&self) {
        let mut section = self.session.enter().await;
        if section.transport.take().is_some() {
            self.closed.store(true, Ordering::SeqCst);
            info!("HTTP requester session closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}
