//! Memoization port - content-keyed result caching
//!
//! The analyzers are deterministic, so results for identical inputs can be
//! reused. Hosts decide lifetime and eviction by choosing the adapter.

/// A write-once-per-key cache keyed by exact input content.
///
/// Implementations must be safe to share between threads. Storing a value for
/// a key that already has one may keep either value; both are equal because
/// the producers are deterministic.
pub trait MemoCachePort<V>: Send + Sync {
    fn get(&self, key: &str) -> Option<V>;

    fn put(&self, key: String, value: V);
}
