use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};

pub const DEFAULT_MAX_ITEMS: usize = 1000;
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

#[derive(Debug)]
struct Entry {
    value: String,
    inserted: Instant,
    last_access: u64,
}

#[derive(Debug, Default)]
struct State {
    entries: HashMap<String, Entry>,
    tick: u64,
}

impl State {
    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }
}

/// Bounded cache of formatted strings.
///
/// Entries expire after the TTL. A sweep drops expired entries first and
/// then the least recently used ones until the cache fits `max_items`.
#[derive(Debug)]
pub struct ValueCache {
    state: Mutex<State>,
    max_items: usize,
    ttl: Duration,
}

impl Default for ValueCache {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ITEMS, DEFAULT_TTL)
    }
}

impl ValueCache {
    pub fn new(max_items: usize, ttl: Duration) -> Self {
        Self {
            state: Mutex::new(State::default()),
            max_items,
            ttl,
        }
    }

    fn is_expired(&self, entry: &Entry, now: Instant) -> bool {
        now.duration_since(entry.inserted) >= self.ttl
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let mut state = self.state.lock();
        let now = Instant::now();
        let expired = self.is_expired(state.entries.get(key)?, now);
        if expired {
            state.entries.remove(key);
            return None;
        }
        let tick = state.next_tick();
        let entry = state.entries.get_mut(key)?;
        entry.last_access = tick;
        Some(entry.value.clone())
    }

    pub fn insert(&self, key: impl Into<String>, value: String) {
        let mut state = self.state.lock();
        let tick = state.next_tick();
        state.entries.insert(
            key.into(),
            Entry {
                value,
                inserted: Instant::now(),
                last_access: tick,
            },
        );
        if state.entries.len() > self.max_items {
            self.sweep_locked(&mut state);
        }
    }

    /// Return the cached value or compute, store and return it.
    /// Errors from `compute` are passed through and nothing is stored.
    pub fn get_or_try_insert_with<E>(
        &self,
        key: &str,
        compute: impl FnOnce() -> Result<String, E>,
    ) -> Result<String, E> {
        if let Some(hit) = self.get(key) {
            return Ok(hit);
        }
        let value = compute()?;
        self.insert(key, value.clone());
        Ok(value)
    }

    /// Drop expired entries, then evict least recently used ones over capacity.
    /// Returns the number of entries removed.
    pub fn sweep(&self) -> usize {
        let mut state = self.state.lock();
        self.sweep_locked(&mut state)
    }

    fn sweep_locked(&self, state: &mut State) -> usize {
        let before = state.entries.len();
        let now = Instant::now();
        state.entries.retain(|_, entry| !self.is_expired(entry, now));

        let excess = state.entries.len().saturating_sub(self.max_items);
        if excess > 0 {
            let mut by_age: Vec<(u64, String)> = state
                .entries
                .iter()
                .map(|(key, entry)| (entry.last_access, key.clone()))
                .collect();
            by_age.sort_unstable();
            for (_, key) in by_age.into_iter().take(excess) {
                state.entries.remove(&key);
            }
        }

        let removed = before - state.entries.len();
        if removed > 0 {
            tracing::debug!(removed, remaining = state.entries.len(), "value cache sweep");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.state.lock().entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evicts_least_recently_used() {
        let cache = ValueCache::new(2, Duration::from_secs(60));
        cache.insert("a", "1".to_string());
        cache.insert("b", "2".to_string());
        assert_eq!(cache.get("a").as_deref(), Some("1"));

        cache.insert("c", "3".to_string());

        assert_eq!(cache.len(), 2);
        assert!(cache.get("b").is_none());
        assert!(cache.get("a").is_some());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn test_expired_entries_are_dropped() {
        let cache = ValueCache::new(10, Duration::ZERO);
        cache.insert("a", "1".to_string());
        assert!(cache.get("a").is_none());
        cache.insert("b", "2".to_string());
        assert_eq!(cache.sweep(), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_compute_error_is_not_cached() {
        let cache = ValueCache::default();
        let failed: Result<String, &str> = cache.get_or_try_insert_with("k", || Err("boom"));
        assert!(failed.is_err());
        assert!(cache.is_empty());

        let ok: Result<String, &str> = cache.get_or_try_insert_with("k", || Ok("v".to_string()));
        assert_eq!(ok.unwrap(), "v");
        let hit: Result<String, &str> = cache.get_or_try_insert_with("k", || Err("not called"));
        assert_eq!(hit.unwrap(), "v");
    }
}
