//! The contract shared by mergeable priority queues.
//!
//! - [`MergeableHeap`]: insert, inspect and extract the minimum, merge two heaps.
//! - [`AddressableHeap`]: additionally decrease the key of, or delete, an element
//!   identified by the handle that `insert` returned.
//!
//! A backend that cannot perform an operation cheaply still provides it through an
//! explicit slower fallback, so generic code can rely on the full contract.

use crate::Result;

/// A priority queue storing values under ordered keys that can be merged with another
/// queue of the same type.
pub trait MergeableHeap<K, V>: Sized {
	/// Identifies an element after insertion.
	type Handle;

	/// Inserts `value` under `key` and returns a handle to it.
	fn insert(&mut self, key: K, value: V) -> Self::Handle;

	/// Returns the minimum key and its value.
	///
	/// # Errors
	///
	/// `Error::EmptyHeap` if there are no elements.
	fn peek_min(&self) -> Result<(&K, &V)>;

	/// Removes and returns the minimum key and its value.
	///
	/// # Errors
	///
	/// `Error::EmptyHeap` if there are no elements.
	fn extract_min(&mut self) -> Result<(K, V)>;

	/// Consumes both heaps and returns one heap holding the elements of both.
	fn merge(self, other: Self) -> Self;

	/// Returns the number of stored elements.
	fn len(&self) -> usize;

	/// Returns `true` if no elements are stored.
	fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// A mergeable heap whose elements can be addressed through handles.
pub trait AddressableHeap<K, V>: MergeableHeap<K, V> {
	/// Lowers the key of the addressed element to `new_key`.
	///
	/// # Errors
	///
	/// - `Error::InvalidHandle` if the handle does not refer to a stored element.
	/// - `Error::DecreaseKeyOutOfOrder` if `new_key` is greater than the current key.
	fn decrease_key(&mut self, handle: Self::Handle, new_key: K) -> Result<()>;

	/// Removes the addressed element and returns its key and value.
	///
	/// # Errors
	///
	/// `Error::InvalidHandle` if the handle does not refer to a stored element.
	fn delete(&mut self, handle: Self::Handle) -> Result<(K, V)>;
}
