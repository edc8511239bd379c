//! Sleepy HTTP - command line driver for the caching requester
//!
//! Fetches every URL given on the command line twice, the second time through
//! the cache, then prints the cache statistics.

use std::sync::Arc;

use anyhow::{bail, Context};
use reqwest::header::HeaderMap;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sleepy_http::{spawn_cleanup_task, CachedRequester, Config, RequestParams, ResponseBody};

/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open the requester session and start the TTL sweep
/// 4. Fetch the requested URLs until done or interrupted
/// 5. Close the session on every exit path
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sleepy_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let urls: Vec<String> = std::env::args().skip(1).collect();
    if urls.is_empty() {
        bail!("usage: sleepy_http <url>...");
    }

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_capacity={}, cache_ttl={:?}, timeout={:?}",
        config.cache_capacity, config.cache_ttl, config.request_timeout
    );

    let requester = Arc::new(
        CachedRequester::start(&config, HeaderMap::new())
            .context("failed to start the HTTP requester")?,
    );
    let cleanup_handle = spawn_cleanup_task(requester.clone(), config.cleanup_interval);

    tokio::select! {
        _ = fetch_all(&requester, &urls) => {}
        _ = signal::ctrl_c() => {
            warn!("Received Ctrl+C, shutting down");
        }
    }

    let stats = requester.cache_stats().await;
    println!("{}", serde_json::to_string_pretty(&stats)?);

    requester.close().await;
    cleanup_handle.abort();
    Ok(())
}

async fn fetch_all(requester: &CachedRequester, urls: &[String]) {
    for url in urls {
        for _ in 0..2 {
            match requester.get(url, true, RequestParams::new()).await {
                Ok(body) => println!("{url}: {}", summarize(&body)),
                Err(err) => {
                    error!("{}", err);
                    break;
                }
            }
        }
    }
}

fn summarize(body: &ResponseBody) -> String {
    const MAX_CHARS: usize = 200;

    let full = match body {
        ResponseBody::Json(value) => value.to_string(),
        ResponseBody::Text(text) => text.clone(),
        ResponseBody::Bytes(bytes) => return format!("<{} bytes>", bytes.len()),
    };

    if full.chars().count() > MAX_CHARS {
        let cut: String = full.chars().take(MAX_CHARS).collect();
        format!("{cut}...")
    } else {
        full
    }
}
