//! TTL Cleanup Task
//!
//! Background task that periodically drops expired responses from the cache.
//! Expired entries are already invisible to lookups; this only reclaims memory.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::http::{CachedRequester, Transport};

/// Spawns the sweep task.
///
/// Every `interval` the task enters the requester's exclusive section and
/// purges expired entries. It stops on its own once the requester is closed,
/// or can be aborted through the returned handle.
pub fn spawn_cleanup_task<T: Transport>(
    requester: Arc<CachedRequester<T>>,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} seconds",
            interval.as_secs_f64()
        );

        loop {
            tokio::time::sleep(interval).await;

            if requester.is_closed() {
                debug!("Requester closed, stopping TTL cleanup task");
                break;
            }

            let removed = requester.purge_expired().await;
            if removed > 0 {
                info!("TTL cleanup: removed {} expired responses", removed);
            } else {
                debug!("TTL cleanup: no expired responses found");
            }
        }
    })
}
