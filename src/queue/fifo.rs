//! FIFO queue guarded by a single reader/writer lock
//!
//! Every operation holds the lock for its whole duration, so each call is a
//! single atomic step in the total order of lock acquisitions:
//!
//! ```text
//! peek, peek_n, len, is_empty        -> shared (read) lock
//! push, pop, pop_n, pop_all,
//! pop_while, pop_until, clear        -> exclusive (write) lock
//! ```
//!
//! Nothing waits for data. A pop or peek on a queue that cannot satisfy it
//! fails immediately with [`Error::Empty`] or [`Error::Insufficient`], and
//! a failing batch call leaves the queue exactly as it found it.
//!
//! ## Predicates
//!
//! `pop_while` and `pop_until` call the predicate with the exclusive lock
//! held. A predicate that calls a blocking method on the same queue
//! deadlocks. Use [`Queue::try_len`] if a predicate needs to look at the
//! queue at all.

use crate::metrics::{AtomicQueueMetrics, MetricsCollector, QueueMetrics};
use crate::sync::RwLock;
use crate::{Error, Result};
use std::collections::VecDeque;
use std::fmt;

/// A thread-safe FIFO queue with atomic batch operations
///
/// # Examples
///
/// ```rust
/// use rwsync::Queue;
/// use std::sync::Arc;
/// use std::thread;
///
/// let queue = Arc::new(Queue::new());
///
/// let producers: Vec<_> = (0..4)
///     .map(|id| {
///         let queue = Arc::clone(&queue);
///         thread::spawn(move || {
///             for i in 0..100 {
///                 queue.push(id * 100 + i);
///             }
///         })
///     })
///     .collect();
///
/// for producer in producers {
///     producer.join().unwrap();
/// }
///
/// assert_eq!(queue.len(), 400);
/// assert_eq!(queue.pop_all().len(), 400);
/// assert!(queue.is_empty());
/// ```
pub struct Queue<T> {
    items: RwLock<VecDeque<T>>,
    metrics: AtomicQueueMetrics,
}

impl<T> Queue<T> {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty queue with room for `capacity` elements
    ///
    /// The capacity is only a preallocation hint; the queue grows without
    /// bound.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: RwLock::new(VecDeque::with_capacity(capacity)),
            metrics: AtomicQueueMetrics::default(),
        }
    }

    /// Append a value to the tail
    pub fn push(&self, value: T) {
        let mut items = self.items.write();
        items.push_back(value);
        self.metrics.record_push(1, items.len());
    }

    /// Append every value from `values` to the tail in one atomic step
    ///
    /// No other push can interleave with the batch, so the values stay
    /// contiguous and in iteration order. Returns the number of values
    /// pushed.
    ///
    /// The values are collected before the lock is taken, so if the
    /// iterator panics the queue is left untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rwsync::Queue;
    ///
    /// let queue = Queue::new();
    /// assert_eq!(queue.push_batch(vec![1, 2, 3]), 3);
    /// assert_eq!(queue.pop_all(), vec![1, 2, 3]);
    /// ```
    pub fn push_batch<I>(&self, values: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        let batch: Vec<T> = values.into_iter().collect();
        let pushed = batch.len();
        let mut items = self.items.write();
        items.extend(batch);
        self.metrics.record_push(pushed, items.len());
        pushed
    }

    /// Remove and return the head
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the queue has no elements.
    pub fn pop(&self) -> Result<T> {
        let popped = self.items.write().pop_front();
        match popped {
            Some(value) => {
                self.metrics.record_pop(1);
                Ok(value)
            }
            None => self.fail(Error::Empty),
        }
    }

    /// Remove and return the head, panicking if the queue is empty
    ///
    /// Only for call sites where program logic already guarantees an
    /// element is present.
    ///
    /// # Panics
    ///
    /// Panics with [`Error::Empty`] if the queue has no elements.
    #[track_caller]
    pub fn must_pop(&self) -> T {
        must(self.pop())
    }

    /// Remove and return the first `n` elements in order
    ///
    /// All or nothing: if fewer than `n` elements are present nothing is
    /// removed. `pop_n(0)` always succeeds with an empty vector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Insufficient`] if the queue holds fewer than `n`
    /// elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rwsync::{Error, Queue};
    ///
    /// let queue: Queue<i32> = (1..=3).collect();
    /// assert_eq!(queue.pop_n(4), Err(Error::Insufficient { requested: 4, len: 3 }));
    /// assert_eq!(queue.len(), 3);
    /// assert_eq!(queue.pop_n(2)?, vec![1, 2]);
    /// # Ok::<(), Error>(())
    /// ```
    pub fn pop_n(&self, n: usize) -> Result<Vec<T>> {
        let mut items = self.items.write();
        let len = items.len();
        if len < n {
            drop(items);
            return self.fail(Error::Insufficient { requested: n, len });
        }
        let popped: Vec<T> = items.drain(..n).collect();
        drop(items);
        self.metrics.record_pop(popped.len());
        Ok(popped)
    }

    /// Remove and return the first `n` elements, panicking if there are
    /// fewer than `n`
    ///
    /// # Panics
    ///
    /// Panics with [`Error::Insufficient`] if the queue holds fewer than
    /// `n` elements.
    #[track_caller]
    pub fn must_pop_n(&self, n: usize) -> Vec<T> {
        must(self.pop_n(n))
    }

    /// Remove and return every element; the queue is left empty
    pub fn pop_all(&self) -> Vec<T> {
        let popped: Vec<T> = self.items.write().drain(..).collect();
        self.metrics.record_pop(popped.len());
        tracing::trace!(count = popped.len(), "drained queue");
        popped
    }

    /// Remove elements from the head while `pred` holds
    ///
    /// Stops at the first element for which `pred` returns `false`; that
    /// element stays at the head. Returns the removed elements in order,
    /// possibly none.
    ///
    /// `pred` runs under the exclusive lock and must not call blocking
    /// methods on this queue. If `pred` panics nothing is removed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rwsync::Queue;
    ///
    /// let queue: Queue<i32> = (1..=5).collect();
    /// assert_eq!(queue.pop_while(|v| v % 2 == 1), vec![1]);
    /// assert_eq!(queue.pop_all(), vec![2, 3, 4, 5]);
    /// ```
    pub fn pop_while<F>(&self, pred: F) -> Vec<T>
    where
        F: FnMut(&T) -> bool,
    {
        self.drain_prefix(pred)
    }

    /// Remove elements from the head until `pred` holds
    ///
    /// Stops at the first element for which `pred` returns `true`; that
    /// element stays at the head. Returns the removed elements in order,
    /// possibly none.
    ///
    /// The same locking contract as [`Queue::pop_while`] applies.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rwsync::Queue;
    ///
    /// let queue: Queue<i32> = (1..=5).collect();
    /// assert_eq!(queue.pop_until(|v| v % 2 == 0), vec![1]);
    /// assert_eq!(queue.peek(), Ok(2));
    /// ```
    pub fn pop_until<F>(&self, mut pred: F) -> Vec<T>
    where
        F: FnMut(&T) -> bool,
    {
        self.drain_prefix(|value| !pred(value))
    }

    // Scans first and drains after, so a panicking predicate removes nothing.
    fn drain_prefix<F>(&self, mut keep_going: F) -> Vec<T>
    where
        F: FnMut(&T) -> bool,
    {
        let mut items = self.items.write();
        let count = items.iter().take_while(|value| keep_going(*value)).count();
        let popped: Vec<T> = items.drain(..count).collect();
        drop(items);
        self.metrics.record_pop(popped.len());
        if !popped.is_empty() {
            tracing::trace!(count = popped.len(), "drained queue prefix");
        }
        popped
    }

    /// Remove every element without returning them
    pub fn clear(&self) {
        self.items.write().clear();
    }

    /// Get the current number of elements in the queue
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the current length without blocking
    ///
    /// Returns `None` if a writer holds the lock, including when called
    /// from inside a `pop_while`/`pop_until` predicate on this queue.
    pub fn try_len(&self) -> Option<usize> {
        self.items.try_read().map(|items| items.len())
    }

    fn fail<V>(&self, err: Error) -> Result<V> {
        self.metrics.record_failure();
        Err(err)
    }
}

impl<T: Clone> Queue<T> {
    /// Return a clone of the head without removing it
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the queue has no elements.
    pub fn peek(&self) -> Result<T> {
        let head = self.items.read().front().cloned();
        match head {
            Some(value) => Ok(value),
            None => self.fail(Error::Empty),
        }
    }

    /// Return a clone of the head, panicking if the queue is empty
    ///
    /// # Panics
    ///
    /// Panics with [`Error::Empty`] if the queue has no elements.
    #[track_caller]
    pub fn must_peek(&self) -> T {
        must(self.peek())
    }

    /// Return clones of the first `n` elements in order, leaving the queue
    /// unchanged
    ///
    /// The returned vector is independent of the queue; later pushes and
    /// pops do not affect it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Insufficient`] if the queue holds fewer than `n`
    /// elements.
    pub fn peek_n(&self, n: usize) -> Result<Vec<T>> {
        let items = self.items.read();
        let len = items.len();
        if len < n {
            drop(items);
            return self.fail(Error::Insufficient { requested: n, len });
        }
        let head: Vec<T> = items.iter().take(n).cloned().collect();
        Ok(head)
    }

    /// Return clones of the first `n` elements, panicking if there are
    /// fewer than `n`
    ///
    /// # Panics
    ///
    /// Panics with [`Error::Insufficient`] if the queue holds fewer than
    /// `n` elements.
    #[track_caller]
    pub fn must_peek_n(&self, n: usize) -> Vec<T> {
        must(self.peek_n(n))
    }
}

#[track_caller]
fn must<V>(result: Result<V>) -> V {
    match result {
        Ok(value) => value,
        Err(err) => {
            tracing::error!(error = %err, "queue contract violated");
            panic!("{err}")
        }
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let queue = Self::new();
        queue.push_batch(iter);
        queue
    }
}

impl<T> Extend<T> for Queue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.push_batch(iter);
    }
}

impl<T> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Queue");
        match self.try_len() {
            Some(len) => debug.field("len", &len),
            None => debug.field("len", &format_args!("<locked>")),
        };
        debug.finish()
    }
}

impl<T> MetricsCollector for Queue<T> {
    type Snapshot = QueueMetrics;

    fn metrics(&self) -> QueueMetrics {
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
