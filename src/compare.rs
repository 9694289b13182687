//! Orderings that decide which key a `FibonacciHeap` considers the minimum.
//!
//! The heap never calls `Ord` on its keys directly; every comparison goes through a
//! `Compare` implementation that is chosen when the heap is constructed. This makes it
//! possible to use the very same heap as a max-heap or with keys that carry no natural
//! order at all.

use std::cmp::Ordering;

/// Decides the order of keys within a heap.
///
/// The heap treats the key for which `compare` reports `Less` as the smaller one and
/// always extracts the smallest key first. Implementations must be a total order and
/// must stay consistent for the lifetime of the heap.
pub trait Compare<K: ?Sized> {
	/// Compares two keys.
	fn compare(&self, a: &K, b: &K) -> Ordering;

	/// Returns `true` if `a` is strictly smaller than `b`.
	#[inline]
	fn less(&self, a: &K, b: &K) -> bool {
		self.compare(a, b) == Ordering::Less
	}
}

/// The natural order of `Ord` keys. Turns the heap into a min-heap.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct MinOrder;

impl<K> Compare<K> for MinOrder
where
	K: Ord + ?Sized,
{
	#[inline]
	fn compare(&self, a: &K, b: &K) -> Ordering {
		a.cmp(b)
	}
}

/// The reversed natural order of `Ord` keys. Turns the heap into a max-heap.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct MaxOrder;

impl<K> Compare<K> for MaxOrder
where
	K: Ord + ?Sized,
{
	#[inline]
	fn compare(&self, a: &K, b: &K) -> Ordering {
		b.cmp(a)
	}
}

/// An order given by a comparison function or closure.
///
/// ```
/// use fibonacci_heap::{FibonacciHeap, FnOrder};
///
/// // order by absolute value
/// let mut heap = FibonacciHeap::with_comparator(FnOrder(|a: &i32, b: &i32| a.abs().cmp(&b.abs())));
/// heap.push(-7, ());
/// heap.push(3, ());
/// heap.push(-1, ());
/// assert_eq!(heap.pop(), Some((-1, ())));
/// assert_eq!(heap.pop(), Some((3, ())));
/// ```
#[derive(Debug, Default, Copy, Clone)]
pub struct FnOrder<F>(pub F);

impl<K, F> Compare<K> for FnOrder<F>
where
	K: ?Sized,
	F: Fn(&K, &K) -> Ordering,
{
	#[inline]
	fn compare(&self, a: &K, b: &K) -> Ordering {
		(self.0)(a, b)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn min_and_max_are_mirrored() {
		assert!(MinOrder.less(&1, &2));
		assert!(!MinOrder.less(&2, &2));
		assert!(MaxOrder.less(&2, &1));
		assert_eq!(MaxOrder.compare(&"a", &"b"), Ordering::Greater);
	}

	#[test]
	fn closures() {
		let by_len = FnOrder(|a: &&str, b: &&str| a.len().cmp(&b.len()));
		assert!(by_len.less(&"zz", &"aaa"));
		assert_eq!(by_len.compare(&"ab", &"cd"), Ordering::Equal);
	}
}
