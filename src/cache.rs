//! In-memory placeholder cache.
//!
//! Reading and re-encoding a source image is the expensive part of
//! placeholder generation, and templates ask for the same asset many times
//! during one build. [`PlaceholderCache`] memoizes finished data URLs for the
//! lifetime of the owning generator.
//!
//! # Semantics
//!
//! - Keys are asset keys as chosen by the generator (the relative asset path,
//!   or the resolved file path for handles).
//! - Only successful results are stored. A failed asset is retried on the
//!   next request.
//! - Entries are never evicted and never overwritten: when two threads race
//!   on the same missing key, both encode and the first insert wins. The
//!   results are identical, so the loser's work is only wasted, not wrong.
//!
//! The cache also keeps the [`CacheStats`] printed at the end of a CLI run.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Process-lifetime map from asset key to data URL.
#[derive(Debug, Default)]
pub struct PlaceholderCache {
    entries: Mutex<HashMap<String, String>>,
    stats: Mutex<CacheStats>,
}

/// Lock ignoring poison: every critical section leaves the map consistent.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl PlaceholderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached data URL. Counts a hit when found.
    pub fn get(&self, key: &str) -> Option<String> {
        let found = lock(&self.entries).get(key).cloned();
        if found.is_some() {
            lock(&self.stats).hit();
        }
        found
    }

    /// Store a freshly encoded data URL unless the key is already present.
    ///
    /// Returns the value now in the cache, which is the earlier one when the
    /// key was filled concurrently.
    pub fn insert(&self, key: &str, data_url: String) -> String {
        lock(&self.stats).miss();
        lock(&self.entries)
            .entry(key.to_string())
            .or_insert(data_url)
            .clone()
    }

    /// Record that a request ended in the fallback placeholder.
    pub fn record_failure(&self) {
        lock(&self.stats).fail();
    }

    pub fn contains(&self, key: &str) -> bool {
        lock(&self.entries).contains_key(key)
    }

    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the counters so far.
    pub fn stats(&self) -> CacheStats {
        lock(&self.stats).clone()
    }
}

/// Summary of cache performance for a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u32,
    pub misses: u32,
    pub failures: u32,
}

impl CacheStats {
    pub fn hit(&mut self) {
        self.hits += 1;
    }

    pub fn miss(&mut self) {
        self.misses += 1;
    }

    pub fn fail(&mut self) {
        self.failures += 1;
    }

    pub fn total(&self) -> u32 {
        self.hits + self.misses + self.failures
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hits > 0 || self.failures > 0 {
            if self.failures > 0 {
                write!(
                    f,
                    "{} cached, {} encoded, {} failed ({} total)",
                    self.hits,
                    self.misses,
                    self.failures,
                    self.total()
                )
            } else {
                write!(
                    f,
                    "{} cached, {} encoded ({} total)",
                    self.hits,
                    self.misses,
                    self.total()
                )
            }
        } else {
            write!(f, "{} encoded", self.misses)
        }
    }
}
