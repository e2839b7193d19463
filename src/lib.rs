//! # rwsync
//!
//! Small, thread-safe building blocks for producer/consumer code.
//!
//! ## Features
//!
//! - **Queue**: FIFO queue behind a single reader/writer lock, with atomic
//!   batch pops and predicate-driven drains
//! - **Pool**: Factory-backed cache of recyclable values
//! - **Metrics**: Relaxed operation counters on both types
//!
//! ## Quick Start
//!
//! ```rust
//! use rwsync::Queue;
//!
//! let queue = Queue::new();
//! queue.push(1);
//! queue.push(2);
//! queue.push(3);
//!
//! assert_eq!(queue.pop_n(2)?, vec![1, 2]);
//! assert_eq!(queue.pop_all(), vec![3]);
//! # Ok::<(), rwsync::Error>(())
//! ```
//!
//! ## Thread Safety
//!
//! Every queue operation acquires the lock for its whole duration: shared
//! mode for `peek`, `peek_n`, `len` and `is_empty`, exclusive mode for
//! anything that mutates. Nothing blocks waiting for data; a read on an
//! empty or short queue fails immediately.
//!
//! Predicates passed to [`Queue::pop_while`] and [`Queue::pop_until`] run
//! while the exclusive lock is held. They must not call back into the same
//! queue (a blocking call deadlocks).

#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

pub mod metrics;
pub mod pool;
pub mod queue;

mod sync;

pub use crate::metrics::MetricsCollector;
pub use crate::pool::Pool;
pub use crate::queue::Queue;

/// Error types for queue operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// No element is available
    #[error("queue is empty")]
    Empty,
    /// The requested batch is larger than the queue
    #[error("queue length {len} is less than {requested}")]
    Insufficient {
        /// Number of elements asked for
        requested: usize,
        /// Length of the queue when the call was made
        len: usize,
    },
}

/// Result type for queue operations
pub type Result<T> = core::result::Result<T, Error>;
