//! Periodic purge of expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::subsystems::runtime::{Component, ComponentFuture};

use super::ResponseCache;

pub struct CacheSweeper {
    cache: Arc<ResponseCache>,
    interval: Duration,
}

impl CacheSweeper {
    pub fn new(cache: Arc<ResponseCache>, interval: Duration) -> Self {
        Self { cache, interval }
    }
}

impl Component for CacheSweeper {
    fn id(&self) -> &str {
        "cache-sweeper"
    }

    fn run(self: Box<Self>, shutdown: CancellationToken) -> ComponentFuture {
        Box::pin(async move {
            info!(interval_secs = self.interval.as_secs(), "cache sweeper started");
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // first tick completes immediately
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    _ = ticker.tick() => {
                        let removed = self.cache.purge_expired();
                        if removed > 0 {
                            debug!(removed, remaining = self.cache.len(), "purged expired cache entries");
                        }
                    }
                }
            }
            debug!("cache sweeper stopped");
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subsystems::cache::ManualClock;

    #[tokio::test(start_paused = true)]
    async fn sweeps_on_interval_and_stops() {
        let clock = Arc::new(ManualClock::new(chrono::Utc::now()));
        let cache = Arc::new(ResponseCache::new(Duration::from_secs(10), clock.clone()));
        cache.put("stale", "v");
        clock.advance(Duration::from_secs(11));

        let token = CancellationToken::new();
        let sweeper = Box::new(CacheSweeper::new(cache.clone(), Duration::from_secs(5)));
        let task = tokio::spawn(sweeper.run(token.clone()));

        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(cache.len(), 0);

        token.cancel();
        assert!(task.await.unwrap().is_ok());
    }
}
