//! Recyclable object pool
//!
//! A [`Pool`] hands out values from a bounded lock-free cache and falls
//! back to a factory on a miss. Values returned with [`Pool::put`] come
//! back out of [`Pool::get`] as they were left; callers reset state
//! themselves. Once the cache is full, further `put`s drop their value.

use crate::metrics::{AtomicPoolMetrics, MetricsCollector, PoolMetrics};
use crossbeam_queue::ArrayQueue;
use std::fmt;

/// Number of values a pool keeps when built with [`Pool::new`]
pub const DEFAULT_RETAINED: usize = 256;

/// A factory-backed cache of reusable values
///
/// # Examples
///
/// ```rust
/// use rwsync::Pool;
///
/// let pool = Pool::new(|| Vec::<u8>::with_capacity(1024));
///
/// let mut buf = pool.get();
/// buf.extend_from_slice(b"payload");
/// buf.clear();
/// pool.put(buf);
///
/// let buf = pool.get();
/// assert!(buf.capacity() >= 1024);
/// ```
pub struct Pool<T> {
    factory: Box<dyn Fn() -> T + Send + Sync>,
    slots: ArrayQueue<T>,
    metrics: AtomicPoolMetrics,
}

impl<T> Pool<T> {
    /// Create a pool that keeps up to [`DEFAULT_RETAINED`] values
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::with_capacity(DEFAULT_RETAINED, factory)
    }

    /// Create a pool that keeps up to `capacity` values
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity<F>(capacity: usize, factory: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        assert!(capacity > 0, "Capacity must be greater than 0");

        Self {
            factory: Box::new(factory),
            slots: ArrayQueue::new(capacity),
            metrics: AtomicPoolMetrics::default(),
        }
    }

    /// Take a cached value, or build a new one if the cache is empty
    pub fn get(&self) -> T {
        match self.slots.pop() {
            Some(value) => {
                self.metrics.record_hit();
                value
            }
            None => {
                self.metrics.record_miss();
                tracing::trace!("pool miss, calling factory");
                (self.factory)()
            }
        }
    }

    /// Offer a value back for reuse
    ///
    /// The value is dropped if the cache is already full.
    pub fn put(&self, value: T) {
        match self.slots.push(value) {
            Ok(()) => self.metrics.record_recycled(),
            Err(_rejected) => {
                self.metrics.record_discarded();
                tracing::trace!(capacity = self.slots.capacity(), "pool full, value dropped");
            }
        }
    }

    /// Number of values currently cached
    pub fn retained(&self) -> usize {
        self.slots.len()
    }

    /// Maximum number of values the cache keeps
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }
}

impl<T: Default + 'static> Default for Pool<T> {
    fn default() -> Self {
        Self::new(T::default)
    }
}

impl<T> fmt::Debug for Pool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("retained", &self.slots.len())
            .field("capacity", &self.slots.capacity())
            .finish_non_exhaustive()
    }
}

impl<T> MetricsCollector for Pool<T> {
    type Snapshot = PoolMetrics;

    fn metrics(&self) -> PoolMetrics {
        self.metrics.snapshot()
    }

    fn reset_metrics(&self) {
        self.metrics.reset();
    }

    fn set_metrics_enabled(&self, enabled: bool) {
        self.metrics.set_enabled(enabled);
    }

    fn is_metrics_enabled(&self) -> bool {
        self.metrics.is_enabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Record {
        name: String,
    }

    #[test]
    fn test_fresh_pool_uses_factory() {
        let built = Arc::new(AtomicUsize::new(0));
        let pool = {
            let built = Arc::clone(&built);
            Pool::new(move || {
                built.fetch_add(1, Ordering::Relaxed);
                Record::default()
            })
        };

        assert_eq!(pool.get(), Record::default());
        assert_eq!(pool.get(), Record::default());
        assert_eq!(built.load(Ordering::Relaxed), 2);
        assert_eq!(pool.metrics().misses, 2);
    }

    #[test]
    fn test_put_then_get_returns_value() {
        let pool: Pool<Record> = Pool::default();

        let mut record = pool.get();
        record.name = "a".to_string();
        pool.put(record);
        assert_eq!(pool.retained(), 1);

        assert_eq!(pool.get().name, "a");
        assert_eq!(pool.retained(), 0);

        let metrics = pool.metrics();
        assert_eq!(metrics.hits, 1);
        assert_eq!(metrics.misses, 1);
        assert_eq!(metrics.recycled, 1);
    }

    #[test]
    fn test_full_pool_discards() {
        let pool = Pool::with_capacity(2, || 0u32);
        pool.put(1);
        pool.put(2);
        pool.put(3);

        assert_eq!(pool.retained(), 2);
        assert_eq!(pool.capacity(), 2);
        assert_eq!(pool.metrics().discarded, 1);

        let mut got = vec![pool.get(), pool.get()];
        got.sort_unstable();
        assert_eq!(got, vec![1, 2]);
        assert_eq!(pool.get(), 0);
    }

    #[test]
    #[should_panic(expected = "Capacity must be greater than 0")]
    fn test_zero_capacity_panics() {
        let _ = Pool::with_capacity(0, || 0u8);
    }

    #[test]
    fn test_concurrent_get_put() {
        let pool = Arc::new(Pool::with_capacity(16, || vec![0u8; 64]));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let pool = Arc::clone(&pool);
                thread::spawn(move || {
                    for _ in 0..1000 {
                        let buf = pool.get();
                        assert_eq!(buf.len(), 64);
                        pool.put(buf);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let metrics = pool.metrics();
        assert_eq!(metrics.hits + metrics.misses, 8000);
        assert_eq!(metrics.recycled + metrics.discarded, 8000);
        assert!(pool.retained() <= 16);
    }

    #[test]
    fn test_debug_output() {
        let pool = Pool::with_capacity(4, || 1u8);
        pool.put(2);
        assert_eq!(
            format!("{pool:?}"),
            "Pool { retained: 1, capacity: 4, .. }"
        );
    }
}
