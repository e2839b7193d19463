//! Operation Metrics Module
//!
//! Relaxed atomic counters for the queue and the pool. Counting never takes
//! the queue lock and never fails, so it stays off the critical path apart
//! from a few uncontended `fetch_add`s.

use core::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

/// Snapshot of queue activity
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct QueueMetrics {
    /// Number of elements pushed
    pub pushed: u64,
    /// Number of elements removed by any pop or drain
    pub popped: u64,
    /// Number of calls that completed without an error
    pub succeeded: u64,
    /// Number of calls that failed with `Empty` or `Insufficient`
    pub failed: u64,
    /// Largest length observed after a push
    pub peak_len: usize,
}

impl QueueMetrics {
    /// Elements pushed but not yet removed, as seen by the counters.
    ///
    /// `clear` does not count as a pop, so this can exceed the live length.
    pub fn outstanding(&self) -> u64 {
        self.pushed.saturating_sub(self.popped)
    }

    /// Calculate failed calls as a percentage of all counted calls
    pub fn failure_rate(&self) -> f64 {
        let total = self.succeeded + self.failed;
        if total == 0 {
            0.0
        } else {
            (self.failed as f64 / total as f64) * 100.0
        }
    }
}

/// Snapshot of pool activity
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PoolMetrics {
    /// `get` calls served from the cache
    pub hits: u64,
    /// `get` calls that fell back to the factory
    pub misses: u64,
    /// Values accepted back by `put`
    pub recycled: u64,
    /// Values dropped by `put` because the cache was full
    pub discarded: u64,
}

impl PoolMetrics {
    /// Calculate hit rate as percentage
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// Trait for data structures that support operation metrics
pub trait MetricsCollector {
    /// Snapshot type returned by [`MetricsCollector::metrics`]
    type Snapshot;

    /// Get current metrics
    fn metrics(&self) -> Self::Snapshot;

    /// Reset all metrics
    fn reset_metrics(&self);

    /// Enable or disable metrics collection
    fn set_metrics_enabled(&self, enabled: bool);

    /// Check if metrics collection is enabled
    fn is_metrics_enabled(&self) -> bool;
}

#[derive(Debug)]
pub(crate) struct AtomicQueueMetrics {
    enabled: AtomicBool,
    pushed: AtomicU64,
    popped: AtomicU64,
    succeeded: AtomicU64,
    failed: AtomicU64,
    peak_len: AtomicUsize,
}

impl Default for AtomicQueueMetrics {
    fn default() -> Self {
        Self {
            enabled: AtomicBool::new(true),
            pushed: AtomicU64::new(0),
            popped: AtomicU64::new(0),
            succeeded: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            peak_len: AtomicUsize::new(0),
        }
    }
}

impl AtomicQueueMetrics {
    pub(crate) fn record_push(&self, count: usize, len_after: usize) {
        if !self.is_enabled() {
            return;
        }
        self.pushed.fetch_add(count as u64, Ordering::Relaxed);
        self.succeeded.fetch_add(1, Ordering::Relaxed);
        self.peak_len.fetch_max(len_after, Ordering::Relaxed);
    }

    pub(crate) fn record_pop(&self, count: usize) {
        if self.is_enabled() {
            self.popped.fetch_add(count as u64, Ordering::Relaxed);
            self.succeeded.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn record_failure(&self) {
        if self.is_enabled() {
            self.failed.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn snapshot(&self) -> QueueMetrics {
        QueueMetrics {
            pushed: self.pushed.load(Ordering::Relaxed),
            popped: self.popped.load(Ordering::Relaxed),
            succeeded: self.succeeded.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            peak_len: self.peak_len.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn reset(&self) {
        self.pushed.store(0, Ordering::Relaxed);
        self.popped.store(0, Ordering::Relaxed);
        self.succeeded.store(0, Ordering::Relaxed);
        self.failed.store(0, Ordering::Relaxed);
        self.peak_len.store(0, Ordering::Relaxed);
    }

    pub(crate) fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    pub(crate) fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }
}

#[derive(Debug)]
pub(crate) struct AtomicPoolMetrics {
    enabled: AtomicBool,
    hits: AtomicU64,
    misses: AtomicU64,
    recycled: AtomicU64,
    discarded: AtomicU64,
}

impl Default for AtomicPoolMetrics {
    fn default() -> Self {
        Self {
            enabled: AtomicBool::new(true),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            recycled: AtomicU64::new(0),
            discarded: AtomicU64::new(0),
        }
    }
}

impl AtomicPoolMetrics {
    pub(crate) fn record_hit(&self) {
        self.bump(&self.hits);
    }

    pub(crate) fn record_miss(&self) {
        self.bump(&self.misses);
    }

    pub(crate) fn record_recycled(&self) {
        self.bump(&self.recycled);
    }

    pub(crate) fn record_discarded(&self) {
        self.bump(&self.discarded);
    }

    fn bump(&self, counter: &AtomicU64) {
        if self.is_enabled() {
            counter.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn snapshot(&self) -> PoolMetrics {
        PoolMetrics {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            recycled: self.recycled.load(Ordering::Relaxed),
            discarded: self.discarded.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.recycled.store(0, Ordering::Relaxed);
        self.discarded.store(0, Ordering::Relaxed);
    }

    pub(crate) fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    pub(crate) fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }
}
