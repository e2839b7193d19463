//! Queue implementations
//!
//! ## Available Queues
//!
//! - [`Queue`]: Unbounded FIFO queue behind a single reader/writer lock
//!
//! ## Operations
//!
//! | Operation | Lock | Fails with |
//! |-----------|------|------------|
//! | `push`, `push_batch` | exclusive | - |
//! | `pop` | exclusive | `Empty` |
//! | `pop_n` | exclusive | `Insufficient` |
//! | `pop_all`, `pop_while`, `pop_until`, `clear` | exclusive | - |
//! | `peek` | shared | `Empty` |
//! | `peek_n` | shared | `Insufficient` |
//! | `len`, `is_empty` | shared | - |
//!
//! Each fallible operation has a `must_` twin that panics instead of
//! returning the error.
//!
//! ## Examples
//!
//! ```rust
//! use rwsync::queue::Queue;
//!
//! let queue = Queue::new();
//! queue.push_batch(["a", "b", "c"]);
//!
//! assert_eq!(queue.peek_n(2)?, vec!["a", "b"]);
//! assert_eq!(queue.pop_until(|s| *s == "c"), vec!["a", "b"]);
//! assert_eq!(queue.must_pop(), "c");
//! # Ok::<(), rwsync::Error>(())
//! ```
pub mod fifo;

pub use fifo::Queue;


#[cfg(test)]
mod proptests;
