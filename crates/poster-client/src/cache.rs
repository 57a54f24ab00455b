//! PosterCache - memoised poster answers, keyed by year-stripped title.
//!
//! Least-recently-used entries are evicted once `capacity` is reached. Only
//! definitive answers from the service are stored (a URL, or "the service has
//! no poster for this title"); transport failures never are.

use lru::LruCache;
use std::num::NonZeroUsize;

/// Entries kept when the caller does not choose
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// A definitive answer for one title
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PosterEntry {
    Found(String),
    Missing,
}

impl PosterEntry {
    pub fn url(&self) -> Option<&str> {
        match self {
            PosterEntry::Found(url) => Some(url),
            PosterEntry::Missing => None,
        }
    }
}

#[derive(Debug)]
pub struct PosterCache {
    entries: LruCache<String, PosterEntry>,
}

impl PosterCache {
    /// A capacity of 0 is treated as 1
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
        }
    }

    /// Look up a title, marking it most recently used
    pub fn get(&mut self, title: &str) -> Option<PosterEntry> {
        self.entries.get(title).cloned()
    }

    pub fn insert(&mut self, title: impl Into<String>, entry: PosterEntry) {
        self.entries.put(title.into(), entry);
    }

    pub fn contains(&self, title: &str) -> bool {
        self.entries.contains(title)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }
}

impl Default for PosterCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
