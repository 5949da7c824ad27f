//! Bounded memory of icons that failed to load.
//!
//! Eviction is by insertion order, so an icon that broke long ago is retried
//! once enough newer failures have pushed it out.

use std::collections::HashSet;
use std::collections::VecDeque;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

pub const DEFAULT_BROKEN_ICON_CAPACITY: usize = 200;

/// FIFO-evicting set with O(1) insert and lookup.
#[derive(Debug, Clone)]
pub struct BrokenIconCache<K> {
    members: HashSet<K>,
    order: VecDeque<K>,
    capacity: usize,
}

impl<K: Clone + Eq + Hash> Default for BrokenIconCache<K> {
    fn default() -> Self {
        Self::new(DEFAULT_BROKEN_ICON_CAPACITY)
    }
}

impl<K: Clone + Eq + Hash> BrokenIconCache<K> {
    /// Creates a cache holding at most `capacity` keys.
    ///
    /// A capacity of zero remembers nothing.
    pub fn new(capacity: usize) -> Self {
        Self {
            members: HashSet::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Records a failure. Returns `true` if `key` was not already present.
    pub fn insert(&mut self, key: K) -> bool {
        if self.capacity == 0 || self.members.contains(&key) {
            return false;
        }

        if self.order.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.members.remove(&oldest);
                log::trace!("[broken_icons] evicted oldest entry");
            }
        }

        self.members.insert(key.clone());
        self.order.push_back(key);
        true
    }

    pub fn contains(&self, key: &K) -> bool {
        self.members.contains(key)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.members.clear();
        self.order.clear();
    }

    /// Keys from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.order.iter()
    }
}

/// A [`BrokenIconCache`] shared between tables.
#[derive(Debug)]
pub struct SharedBrokenIcons<K> {
    inner: Arc<Mutex<BrokenIconCache<K>>>,
}

impl<K> Clone for SharedBrokenIcons<K> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K: Clone + Eq + Hash> Default for SharedBrokenIcons<K> {
    fn default() -> Self {
        Self::new(DEFAULT_BROKEN_ICON_CAPACITY)
    }
}

impl<K: Clone + Eq + Hash> SharedBrokenIcons<K> {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(BrokenIconCache::new(capacity))),
        }
    }

    /// Records a failure. Reporting a known key is a no-op.
    pub fn report(&self, key: K) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Runs `f` with the cache locked.
    pub fn with<T>(&self, f: impl FnOnce(&BrokenIconCache<K>) -> T) -> T {
        f(&self.inner.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evicts_oldest_first() {
        let mut cache = BrokenIconCache::new(3);
        for key in 1..=4 {
            assert!(cache.insert(key));
        }
        assert_eq!(cache.len(), 3);
        assert!(!cache.contains(&1));
        assert_eq!(cache.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
    }

    #[test]
    fn test_reinsert_is_noop() {
        let mut cache = BrokenIconCache::new(3);
        cache.insert(1);
        cache.insert(2);
        assert!(!cache.insert(1));
        assert_eq!(cache.len(), 2);

        // Re-reporting does not refresh position.
        cache.insert(3);
        cache.insert(4);
        assert!(!cache.contains(&1));
    }

    #[test]
    fn test_zero_capacity_remembers_nothing() {
        let mut cache = BrokenIconCache::new(0);
        assert!(!cache.insert("a"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_shared_cache_is_shared() {
        let a = SharedBrokenIcons::new(10);
        let b = a.clone();
        assert!(a.report(5));
        assert!(b.contains(&5));
        assert!(!b.report(5));
        assert_eq!(a.len(), 1);
    }
}
