//! In-process memoization caches

use std::collections::HashMap;
use std::sync::RwLock;

use crate::application::ports::outbound::MemoCachePort;

/// Unbounded process-lifetime cache. Entries are never invalidated; call
/// [`InMemoryMemoCache::clear`] to drop them.
pub struct InMemoryMemoCache<V> {
    entries: RwLock<HashMap<String, V>>,
}

impl<V> InMemoryMemoCache<V> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }
}

impl<V> Default for InMemoryMemoCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + Send + Sync> MemoCachePort<V> for InMemoryMemoCache<V> {
    fn get(&self, key: &str) -> Option<V> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn put(&self, key: String, value: V) {
        // A poisoned lock only costs us the memoization
        if let Ok(mut entries) = self.entries.write() {
            entries.entry(key).or_insert(value);
        }
    }
}

/// Cache that stores nothing, for hosts that want every call recomputed
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMemoCache;

impl<V> MemoCachePort<V> for NoopMemoCache {
    fn get(&self, _key: &str) -> Option<V> {
        None
    }

    fn put(&self, _key: String, _value: V) {}
}
