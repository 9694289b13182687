//! Iterators over the elements of a `FibonacciHeap`.

use crate::arena::Forest;
use crate::compare::Compare;
use crate::fibonacci::FibonacciHeap;
use crate::handle::NodeIx;

/// Iterator over the slots of one circular sibling ring.
///
/// This also iterates inclusively over the node the ring was entered at.
pub(crate) struct Ring<'a, K: 'a, V: 'a> {
	forest: &'a Forest<K, V>,
	sentinel: NodeIx,
	current: NodeIx,
	done: bool,
}

impl<'a, K, V> Ring<'a, K, V> {
	pub(crate) fn new(forest: &'a Forest<K, V>, start: NodeIx) -> Self {
		Ring {
			forest,
			sentinel: start,
			current: start,
			done: start.is_undef(),
		}
	}
}

impl<'a, K, V> Iterator for Ring<'a, K, V> {
	type Item = NodeIx;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}
		let cur = self.current;
		match self.forest.get(cur) {
			Some(_) => {
				self.current = self.forest.right(cur);
				self.done = self.current == self.sentinel;
				Some(cur)
			}
			None => {
				self.done = true;
				None
			}
		}
	}
}

/// Iterator over references to the keys and values stored within a `FibonacciHeap`.
///
/// Walks the forest tree by tree; the order is unspecified.
pub struct Iter<'a, K: 'a, V: 'a> {
	forest: &'a Forest<K, V>,
	pending: Vec<NodeIx>,
	remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
	pub(crate) fn new(forest: &'a Forest<K, V>, min: Option<NodeIx>) -> Self {
		let pending = match min {
			Some(min) => Ring::new(forest, min).collect(),
			None => Vec::new(),
		};
		Iter {
			forest,
			pending,
			remaining: forest.len(),
		}
	}
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
	type Item = (&'a K, &'a V);

	fn next(&mut self) -> Option<Self::Item> {
		let ix = self.pending.pop()?;
		let node = self.forest.get(ix)?;
		if let Some(first) = self.forest.child(ix) {
			self.pending.extend(Ring::new(self.forest, first));
		}
		self.remaining -= 1;
		Some((&node.key, &node.value))
	}

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.remaining, Some(self.remaining))
	}
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K, V, C> IntoIterator for &'a FibonacciHeap<K, V, C> {
	type Item = (&'a K, &'a V);
	type IntoIter = Iter<'a, K, V>;

	#[inline]
	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

/// Iterator over keys and values stored within a `FibonacciHeap` in a sorted-by-min order.
/// Drains the heap.
pub struct DrainMin<K, V, C> {
	heap: FibonacciHeap<K, V, C>,
}

impl<K, V, C> DrainMin<K, V, C> {
	pub(crate) fn new(heap: FibonacciHeap<K, V, C>) -> Self {
		DrainMin { heap }
	}
}

impl<K, V, C> Iterator for DrainMin<K, V, C>
where
	C: Compare<K>,
{
	type Item = (K, V);

	#[inline]
	fn next(&mut self) -> Option<Self::Item> {
		self.heap.pop()
	}

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.heap.len(), Some(self.heap.len()))
	}
}

impl<K, V, C> ExactSizeIterator for DrainMin<K, V, C> where C: Compare<K> {}
