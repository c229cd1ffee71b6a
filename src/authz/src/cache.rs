//! Memoized permission lookups
//!
//! A `LookupCache` belongs to exactly one [`Session`](crate::session::Session)
//! and is dropped with it, so results from one session can never answer a
//! query in the next.

use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Cache of permission-key lookups for one session
#[derive(Debug, Default)]
pub struct LookupCache {
    /// Permission key -> granted
    entries: DashMap<String, bool>,

    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl LookupCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached answer for `key`, or compute, store and return it
    pub fn get_or_insert_with<F>(&self, key: &str, lookup: F) -> bool
    where
        F: FnOnce() -> bool,
    {
        if let Some(entry) = self.entries.get(key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return *entry;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let granted = lookup();
        self.entries.insert(key.to_string(), granted);
        granted
    }

    /// Cached answer for `key`, without computing one
    pub fn peek(&self, key: &str) -> Option<bool> {
        self.entries.get(key).map(|entry| *entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.len(),
        }
    }
}

/// Lookup cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub entries: usize,
}

impl CacheStats {
    /// Calculate cache hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
