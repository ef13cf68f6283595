//! In-process cache store using moka.
//!
//! Per-entry TTL via a custom `Expiry`; size-bounded with TinyLFU eviction.

use std::time::{Duration, Instant};

use moka::sync::Cache;
use moka::Expiry;
use sift_core::errors::SiftResult;
use sift_core::traits::ICacheStore;

#[derive(Clone)]
struct Entry {
    value: String,
    ttl: Duration,
}

struct EntryExpiry;

impl Expiry<String, Entry> for EntryExpiry {
    fn expire_after_create(&self, _key: &String, value: &Entry, _created_at: Instant) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Thread-safe in-memory `ICacheStore`. Last write wins.
pub struct MemoryCacheStore {
    cache: Cache<String, Entry>,
}

impl MemoryCacheStore {
    pub fn new(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .expire_after(EntryExpiry)
            .build();
        Self { cache }
    }

    /// Number of entries currently in the cache (approximate).
    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ICacheStore for MemoryCacheStore {
    fn get(&self, key: &str) -> SiftResult<Option<String>> {
        Ok(self.cache.get(key).map(|e| e.value))
    }

    fn set(&self, key: &str, value: String, ttl: Duration) -> SiftResult<()> {
        self.cache.insert(key.to_string(), Entry { value, ttl });
        Ok(())
    }

    fn delete(&self, key: &str) -> SiftResult<()> {
        self.cache.invalidate(key);
        Ok(())
    }

    fn delete_by_prefix(&self, prefix: &str) -> SiftResult<usize> {
        let doomed: Vec<String> = self
            .cache
            .iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.as_ref().clone())
            .collect();
        for key in &doomed {
            self.cache.invalidate(key);
        }
        Ok(doomed.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get() {
        let store = MemoryCacheStore::new(100);
        store.set("a", "1".into(), Duration::from_secs(60)).unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn miss_returns_none() {
        let store = MemoryCacheStore::new(100);
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn entries_expire_after_their_own_ttl() {
        let store = MemoryCacheStore::new(100);
        store.set("short", "x".into(), Duration::from_millis(20)).unwrap();
        store.set("long", "y".into(), Duration::from_secs(60)).unwrap();
        std::thread::sleep(Duration::from_millis(80));
        assert_eq!(store.get("short").unwrap(), None);
        assert_eq!(store.get("long").unwrap().as_deref(), Some("y"));
    }

    #[test]
    fn delete_by_prefix_only_touches_matching_keys() {
        let store = MemoryCacheStore::new(100);
        let ttl = Duration::from_secs(60);
        store.set("q:synonym:1", "a".into(), ttl).unwrap();
        store.set("q:synonym:2", "b".into(), ttl).unwrap();
        store.set("q:context:1", "c".into(), ttl).unwrap();
        assert_eq!(store.delete_by_prefix("q:synonym:").unwrap(), 2);
        assert_eq!(store.get("q:synonym:1").unwrap(), None);
        assert!(store.get("q:context:1").unwrap().is_some());
    }
}
