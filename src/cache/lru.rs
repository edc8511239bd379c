//! LRU Tracker Module
//!
//! Recency ordering of cache keys for least-recently-used eviction.

use std::collections::VecDeque;

// == LRU Tracker ==
/// Tracks the order in which cache keys were last touched.
///
/// Front of the queue is the most recently touched key, back is the eviction
/// candidate. Capacities are small (tens of entries), so linear removal is fine.
#[derive(Debug, Default)]
pub struct LruTracker {
    order: VecDeque<String>,
}

impl LruTracker {
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as the most recently used one.
    pub fn touch(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            if pos == 0 {
                return;
            }
            if let Some(existing) = self.order.remove(pos) {
                self.order.push_front(existing);
                return;
            }
        }
        self.order.push_front(key.to_owned());
    }

    // == Remove ==
    /// Forgets a key. Unknown keys are ignored.
    pub fn remove(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
        }
    }

    // == Pop Least Recent ==
    /// Removes and returns the least recently used key.
    pub fn pop_least_recent(&mut self) -> Option<String> {
        self.order.pop_back()
    }

    /// Returns the least recently used key without removing it.
    #[cfg(test)]
    pub(crate) fn least_recent(&self) -> Option<&str> {
        self.order.back().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.order.clear();
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const DEFINE: &str = "GET:https://api.dictionaryapi.dev/entries:<term=aloof>";
    const WEATHER: &str = "GET:https://wttr.in/:<format=j1 q=Paris>";
    const JOKE: &str = "GET:https://icanhazdadjoke.com/:<>";

    #[test]
    fn test_lru_new() {
        let lru = LruTracker::new();
        assert!(lru.is_empty());
        assert_eq!(lru.least_recent(), None);
    }

    #[test]
    fn test_lru_insertion_order() {
        let mut lru = LruTracker::new();

        lru.touch(DEFINE);
        lru.touch(WEATHER);
        lru.touch(JOKE);

        assert_eq!(lru.len(), 3);
        assert_eq!(lru.least_recent(), Some(DEFINE));
    }

    #[test]
    fn test_lru_touch_refreshes_key() {
        let mut lru = LruTracker::new();

        lru.touch(DEFINE);
        lru.touch(WEATHER);
        lru.touch(JOKE);
        lru.touch(DEFINE);

        assert_eq!(lru.len(), 3);
        assert_eq!(lru.pop_least_recent().as_deref(), Some(WEATHER));
        assert_eq!(lru.pop_least_recent().as_deref(), Some(JOKE));
        assert_eq!(lru.pop_least_recent().as_deref(), Some(DEFINE));
        assert_eq!(lru.pop_least_recent(), None);
    }

    #[test]
    fn test_lru_touch_same_key_repeatedly() {
        let mut lru = LruTracker::new();

        lru.touch(JOKE);
        lru.touch(JOKE);
        lru.touch(JOKE);

        assert_eq!(lru.len(), 1);
    }

    #[test]
    fn test_lru_remove() {
        let mut lru = LruTracker::new();

        lru.touch(DEFINE);
        lru.touch(WEATHER);
        lru.remove(DEFINE);
        lru.remove("never-inserted");

        assert_eq!(lru.len(), 1);
        assert_eq!(lru.least_recent(), Some(WEATHER));
    }

    #[test]
    fn test_lru_clear() {
        let mut lru = LruTracker::new();

        lru.touch(DEFINE);
        lru.touch(WEATHER);
        lru.clear();

        assert!(lru.is_empty());
    }
}
