//! Compiled regular expressions and the shared compilation cache.

use dashmap::DashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Default number of compiled patterns kept by the global cache
pub const DEFAULT_REGEX_CACHE_CAPACITY: usize = 128;

static GLOBAL_CACHE: OnceLock<RegexCache> = OnceLock::new();

/// Concurrent cache of compiled patterns keyed by pattern text.
///
/// Compilation is side-effect free, so entries are shared read-only across
/// every evaluation that uses the same pattern.
pub struct RegexCache {
    entries: DashMap<String, regex::Regex>,
    capacity: AtomicUsize,
}

impl RegexCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: DashMap::new(),
            capacity: AtomicUsize::new(capacity.max(1)),
        }
    }

    /// The process-wide cache used by [`Regex::new`]
    pub fn global() -> &'static RegexCache {
        GLOBAL_CACHE.get_or_init(|| RegexCache::new(DEFAULT_REGEX_CACHE_CAPACITY))
    }

    pub fn capacity(&self) -> usize {
        self.capacity.load(Ordering::Relaxed)
    }

    pub fn set_capacity(&self, capacity: usize) {
        self.capacity.store(capacity.max(1), Ordering::Relaxed);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Get a cached pattern or compile and cache it
    pub fn get_or_compile(&self, pattern: &str) -> Result<regex::Regex, regex::Error> {
        if let Some(re) = self.entries.get(pattern) {
            return Ok(re.value().clone());
        }

        let re = regex::Regex::new(pattern)?;

        let capacity = self.capacity();
        if self.entries.len() >= capacity {
            // Drop about half the entries rather than tracking recency
            let victims: Vec<String> = self
                .entries
                .iter()
                .take(capacity / 2 + 1)
                .map(|entry| entry.key().clone())
                .collect();
            log::debug!(
                "Regex cache full ({} entries), evicting {}",
                self.entries.len(),
                victims.len()
            );
            for key in victims {
                self.entries.remove(&key);
            }
        }

        self.entries.insert(pattern.to_string(), re.clone());
        Ok(re)
    }
}

/// Compiled regular expression value.
///
/// Two patterns are equal when their source text is equal.
#[derive(Clone)]
pub struct Regex(regex::Regex);

impl Regex {
    /// Compile a pattern through the global cache
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        RegexCache::global().get_or_compile(pattern).map(Regex)
    }

    /// Compile a pattern through a specific cache
    pub fn with_cache(pattern: &str, cache: &RegexCache) -> Result<Self, regex::Error> {
        cache.get_or_compile(pattern).map(Regex)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }
}

impl PartialEq for Regex {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Regex {}

impl fmt::Debug for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Regex(/{}/)", self.as_str())
    }
}

impl fmt::Display for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.as_str())
    }
}
