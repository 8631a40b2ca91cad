//! Short-TTL memoization of read counts.
//!
//! Fronts the persistent counter store so that hot posts do not hit the
//! database on every page view. One instance is constructed per process and
//! shared by reference; there is no global state.

use std::{
  collections::HashMap,
  sync::Mutex,
  time::{Duration, Instant},
};

struct CacheEntry {
  count:     u64,
  stored_at: Instant,
}

/// An in-memory `slug → count` map whose entries expire after a fixed
/// window. Expired entries are indistinguishable from absent ones; the
/// caller is expected to consult the store and [`put`](Self::put) the result
/// back.
pub struct ReadCountCache {
  expiry:  Duration,
  entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ReadCountCache {
  /// Default expiry window: five minutes.
  pub const DEFAULT_EXPIRY: Duration = Duration::from_secs(5 * 60);

  pub fn new() -> Self {
    Self::with_expiry(Self::DEFAULT_EXPIRY)
  }

  /// Build a cache with a custom expiry window. Primarily for tests.
  pub fn with_expiry(expiry: Duration) -> Self {
    Self { expiry, entries: Mutex::new(HashMap::new()) }
  }

  /// Return the cached count for `slug` if it is younger than the expiry
  /// window.
  pub fn get(&self, slug: &str) -> Option<u64> {
    let entries = self.entries.lock().expect("read-count cache poisoned");
    entries
      .get(slug)
      .filter(|e| e.stored_at.elapsed() < self.expiry)
      .map(|e| e.count)
  }

  /// Unconditionally overwrite the cached count for `slug` and reset its
  /// age.
  pub fn put(&self, slug: &str, count: u64) {
    let mut entries = self.entries.lock().expect("read-count cache poisoned");
    entries.insert(slug.to_owned(), CacheEntry { count, stored_at: Instant::now() });
  }
}

impl Default for ReadCountCache {
  fn default() -> Self {
    Self::new()
  }
}
