// SPDX-License-Identifier: Apache-2.0

//! TTL-based in-memory caching for completed analyses.
//!
//! Entries are keyed by repository URL and issue number and validated against
//! the TTL from configuration on every read.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

/// A cached entry with metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The cached data.
    pub data: T,
    /// When the entry was cached.
    pub cached_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    /// Create a new cache entry stamped with the current time.
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    /// Check if this entry is still valid based on TTL.
    ///
    /// # Arguments
    ///
    /// * `ttl` - Time-to-live duration
    ///
    /// # Returns
    ///
    /// `true` if the entry is within its TTL, `false` if expired.
    pub fn is_valid(&self, ttl: Duration) -> bool {
        let now = Utc::now();
        now.signed_duration_since(self.cached_at) < ttl
    }
}

/// Cache key: the repository URL as submitted plus the issue number.
pub type CacheKey = (String, u64);

/// Thread-safe TTL cache.
///
/// The lock is only held for map operations, never across an `.await`.
/// Every insert sweeps expired entries, so the map never holds more than the
/// keys written within one TTL window.
#[derive(Debug)]
pub struct ResultCache<T> {
    ttl: Duration,
    entries: Mutex<HashMap<CacheKey, CacheEntry<T>>>,
}

impl<T: Clone> ResultCache<T> {
    /// Creates a cache whose entries live for `ttl_seconds`. Zero disables caching.
    #[must_use]
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            ttl: i64::try_from(ttl_seconds)
                .ok()
                .and_then(Duration::try_seconds)
                .unwrap_or(Duration::MAX),
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CacheKey, CacheEntry<T>>> {
        self.entries.lock().unwrap_or_else(|poisoned| {
            warn!("Result cache lock poisoned, recovering");
            PoisonError::into_inner(poisoned)
        })
    }

    /// Whether entries are stored at all.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.ttl > Duration::zero()
    }

    /// Returns a clone of the cached value if present and unexpired.
    ///
    /// Expired entries are evicted.
    pub fn get(&self, repo_url: &str, issue_number: u64) -> Option<T> {
        if !self.is_enabled() {
            return None;
        }
        let key = (repo_url.to_string(), issue_number);
        let mut entries = self.lock();
        let valid = entries.get(&key).map(|entry| entry.is_valid(self.ttl))?;
        if valid {
            debug!(repo_url, issue_number, "Cache hit");
            return entries.get(&key).map(|entry| entry.data.clone());
        }

        debug!(repo_url, issue_number, "Cache entry expired");
        entries.remove(&key);
        None
    }

    /// Stores `value`, replacing any previous entry for the key.
    ///
    /// Expired entries for all keys are evicted first.
    pub fn insert(&self, repo_url: &str, issue_number: u64, value: T) {
        if !self.is_enabled() {
            return;
        }
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| entry.is_valid(self.ttl));
        let evicted = before - entries.len();
        if evicted > 0 {
            debug!(evicted, "Evicted expired cache entries");
        }
        entries.insert((repo_url.to_string(), issue_number), CacheEntry::new(value));
    }

    /// Number of stored entries, including expired ones not yet evicted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_entry_new() {
        let entry = CacheEntry::new("data".to_string());
        assert_eq!(entry.data, "data");
        assert!(entry.cached_at <= Utc::now());
    }

    #[test]
    fn test_cache_entry_is_valid_within_ttl() {
        let entry = CacheEntry::new("data");
        assert!(entry.is_valid(Duration::seconds(300)));
    }

    #[test]
    fn test_cache_entry_is_valid_expired() {
        let mut entry = CacheEntry::new("data");
        entry.cached_at = Utc::now() - Duration::seconds(301);
        assert!(!entry.is_valid(Duration::seconds(300)));
    }

    #[test]
    fn test_result_cache_hit() {
        let cache = ResultCache::new(300);
        cache.insert("https://github.com/a/b", 1, "result".to_string());

        assert_eq!(
            cache.get("https://github.com/a/b", 1).as_deref(),
            Some("result")
        );
        assert!(cache.get("https://github.com/a/b", 2).is_none());
        assert!(cache.get("https://github.com/a/c", 1).is_none());
    }

    #[test]
    fn test_result_cache_evicts_expired() {
        let cache = ResultCache::new(60);
        cache.insert("https://github.com/a/b", 1, 42_u32);
        {
            let mut entries = cache.entries.lock().unwrap();
            let entry = entries
                .get_mut(&("https://github.com/a/b".to_string(), 1))
                .unwrap();
            entry.cached_at = Utc::now() - Duration::seconds(61);
        }

        assert!(cache.get("https://github.com/a/b", 1).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_result_cache_insert_sweeps_expired_keys() {
        let cache = ResultCache::new(60);
        for n in 0..100 {
            cache.insert(&format!("https://github.com/a/b?x={n}"), 1, n);
        }
        assert_eq!(cache.len(), 100);
        {
            let mut entries = cache.entries.lock().unwrap();
            for entry in entries.values_mut() {
                entry.cached_at = Utc::now() - Duration::hours(1);
            }
        }

        cache.insert("https://github.com/a/c", 7, 500);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("https://github.com/a/c", 7), Some(500));
    }

    #[test]
    fn test_result_cache_insert_keeps_live_entries() {
        let cache = ResultCache::new(60);
        cache.insert("https://github.com/a/b", 1, 1_u8);
        cache.insert("https://github.com/a/b", 2, 2_u8);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("https://github.com/a/b", 1), Some(1));
    }

    #[test]
    fn test_result_cache_recovers_from_poisoned_lock() {
        let cache = std::sync::Arc::new(ResultCache::new(60));
        cache.insert("https://github.com/a/b", 1, 9_u8);

        let poisoner = std::sync::Arc::clone(&cache);
        let joined = std::thread::spawn(move || {
            let _guard = poisoner.entries.lock().unwrap();
            panic!("poison the cache lock");
        })
        .join();
        assert!(joined.is_err());
        assert!(cache.entries.is_poisoned());

        assert_eq!(cache.get("https://github.com/a/b", 1), Some(9));
        cache.insert("https://github.com/a/b", 2, 10);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_result_cache_zero_ttl_disables() {
        let cache = ResultCache::new(0);
        assert!(!cache.is_enabled());
        cache.insert("https://github.com/a/b", 1, 1_u8);
        assert!(cache.get("https://github.com/a/b", 1).is_none());
        assert_eq!(cache.len(), 0);
    }
}
