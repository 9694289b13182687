#![deny(unused_imports)]
#![deny(missing_docs)]

//! An addressable Fibonacci heap implementation for Rust.
//!
//! Addressable heaps return handles to stored elements that make it possible
//! to query and edit them. For example this allows for the `decrease_key(h: Handle, k)`
//! method that decreases the key (priority) of the element that is associated with the
//! given handle, and for `remove(h: Handle)` that takes an arbitrary element out of the heap.
//!
//! This implementation stores its nodes within a `Stash` that allocates them densely
//! within an array and links them by index. Handles carry a generation so that a handle
//! to an element that already left the heap is rejected instead of addressing whatever
//! element reuses its slot.
//!
//! The order of keys is decided by a comparator (see `Compare`), so the same heap can
//! be used as a min-heap (`MinOrder`, the default), as a max-heap (`MaxOrder`) or with
//! any ordering closure (`FnOrder`).
//!
//! The heap is a single-owner structure: all mutating operations take `&mut self`.
//! Share it between threads only behind a lock.
//!
//! ```
//! use fibonacci_heap::{Error, FibonacciHeap};
//!
//! let mut heap = FibonacciHeap::new();
//! heap.push(5, "five");
//! heap.push(3, "three");
//! let eight = heap.push(8, "eight");
//! heap.push(1, "one");
//!
//! assert_eq!(heap.extract_min(), Ok((1, "one")));
//! heap.decrease_key(eight, 0).unwrap();
//! assert_eq!(heap.peek_min(), Ok((&0, &"eight")));
//! assert_eq!(heap.decrease_key(eight, 4), Err(Error::DecreaseKeyOutOfOrder));
//!
//! let keys = heap.drain_min().map(|(key, _)| key).collect::<Vec<_>>();
//! assert_eq!(keys, vec![0, 3, 5]);
//! ```

mod arena;
mod compare;
mod fibonacci;
mod handle;
mod iter;
mod pretty;
mod traits;

pub use compare::{Compare, FnOrder, MaxOrder, MinOrder};
pub use fibonacci::FibonacciHeap;
pub use handle::Handle;
pub use iter::{DrainMin, Iter};
pub use pretty::Pretty;
pub use traits::{AddressableHeap, MergeableHeap};

/// Errors that can be caused while using `FibonacciHeap`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	/// Caused when querying or extracting the minimum of an empty heap.
	#[error("the heap is empty")]
	EmptyHeap,

	/// Caused when using `decrease_key` method with a `new_key` that is greater than the old one.
	#[error("new key is greater than the current key")]
	DecreaseKeyOutOfOrder,

	/// Caused when using a handle whose element is no longer stored in the heap,
	/// or that was issued by a different heap.
	#[error("handle does not refer to an element of this heap")]
	InvalidHandle,
}

/// Generic `Result` type for `FibonacciHeap` methods.
pub type Result<T> = ::std::result::Result<T, Error>;

/// Type alias for `FibonacciHeap` that has `i64` as default key type.
pub type DefaultFibonacciHeap<V> = FibonacciHeap<i64, V>;

/// Type alias for a `FibonacciHeap` that pops the greatest key first.
pub type MaxFibonacciHeap<K, V = ()> = FibonacciHeap<K, V, MaxOrder>;
