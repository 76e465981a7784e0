//! Response cache: normalized query → rendered reply, with a fixed TTL.
//!
//! Expiry is lazy: an entry whose age has reached the TTL reads as a miss.
//! [`ResponseCache::purge_expired`] physically drops stale entries and is
//! driven by the optional [`CacheSweeper`] component.
//!
//! The lock is held for a single map operation only; nothing awaits while
//! holding it. Two writers racing on one key leave whichever value landed
//! last, which is fine because both answer the same query.

mod clock;
mod sweeper;

pub use clock::{Clock, ManualClock, SystemClock};
pub use sweeper::CacheSweeper;

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};

/// A cached reply and the instant it was written.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub rendered_text: String,
    pub created_at: DateTime<Utc>,
}

impl CacheEntry {
    /// `true` while `now - created_at < ttl`. A clock that moved backwards
    /// counts as fresh.
    fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        match (now - self.created_at).to_std() {
            Ok(age) => age < ttl,
            Err(_) => true,
        }
    }
}

pub struct ResponseCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl ResponseCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self { entries: RwLock::new(HashMap::new()), ttl, clock }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The cached text for `key`, or `None` when absent or expired.
    pub fn get(&self, key: &str) -> Option<String> {
        let now = self.clock.now();
        let map = self.entries.read().unwrap_or_else(|e| e.into_inner());
        map.get(key)
            .filter(|entry| entry.is_fresh(now, self.ttl))
            .map(|entry| entry.rendered_text.clone())
    }

    /// Insert or overwrite `key`, stamped with the current instant.
    pub fn put(&self, key: impl Into<String>, text: impl Into<String>) {
        let entry = CacheEntry { rendered_text: text.into(), created_at: self.clock.now() };
        let mut map = self.entries.write().unwrap_or_else(|e| e.into_inner());
        map.insert(key.into(), entry);
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every expired entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut map = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let before = map.len();
        map.retain(|_, entry| entry.is_fresh(now, self.ttl));
        before - map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(6 * 60 * 60);

    fn cache() -> (ResponseCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        (ResponseCache::new(TTL, clock.clone()), clock)
    }

    #[test]
    fn miss_on_absent_key() {
        let (cache, _) = cache();
        assert!(cache.get("malaria").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn hit_after_put() {
        let (cache, _) = cache();
        cache.put("malaria", "text");
        assert_eq!(cache.get("malaria").as_deref(), Some("text"));
    }

    #[test]
    fn put_overwrites_and_restamps() {
        let (cache, clock) = cache();
        cache.put("k", "old");
        clock.advance(TTL - Duration::from_secs(1));
        cache.put("k", "new");
        clock.advance(Duration::from_secs(10));
        assert_eq!(cache.get("k").as_deref(), Some("new"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn entry_valid_just_before_ttl() {
        let (cache, clock) = cache();
        cache.put("k", "v");
        clock.advance(TTL - Duration::from_millis(1));
        assert!(cache.get("k").is_some());
    }

    #[test]
    fn entry_expires_at_ttl() {
        let (cache, clock) = cache();
        cache.put("k", "v");
        clock.advance(TTL);
        assert!(cache.get("k").is_none());
        // lazy expiry keeps the entry stored
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn purge_removes_only_expired() {
        let (cache, clock) = cache();
        cache.put("old", "v");
        clock.advance(TTL + Duration::from_secs(1));
        cache.put("new", "v");
        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.get("new").is_some());
    }

    #[test]
    fn clock_moving_backwards_keeps_entry() {
        let (cache, clock) = cache();
        let start = clock.now();
        cache.put("k", "v");
        clock.set(start - chrono::Duration::hours(1));
        assert!(cache.get("k").is_some());
    }

    #[test]
    fn concurrent_writers_on_distinct_keys() {
        let cache = Arc::new(ResponseCache::new(TTL, Arc::new(SystemClock)));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    for i in 0..100 {
                        cache.put(format!("{t}-{i}"), format!("v{t}-{i}"));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(cache.len(), 800);
        assert_eq!(cache.get("3-42").as_deref(), Some("v3-42"));
    }
}
