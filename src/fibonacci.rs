//! An addressable Fibonacci heap.
//!
//! The heap is a forest of heap-ordered trees. Roots, and the children of every node,
//! are linked into circular doubly-linked rings so that a single node or a whole ring
//! can be spliced in or out in constant time.
//!
//! All work is deferred as long as possible: `push` and `append` only splice rings,
//! `decrease_key` only cuts, and the forest is tidied up by `pop` which links roots of
//! equal degree until every root degree is unique. Mark bits record which nodes already
//! lost a child so that `decrease_key` can cascade its cuts upwards, which keeps every
//! tree large relative to its root degree and thus keeps `pop` logarithmic.
//!
//! Nodes live in arenas owned by the heap and link to each other by address.

use std::cmp::Ordering;
use std::fmt;
use std::mem;
use std::ops::{Index, IndexMut};

use tracing::{debug, trace};

use crate::arena::{Forest, Node};
use crate::compare::{Compare, MinOrder};
use crate::handle::{Handle, NodeIx};
use crate::iter::{DrainMin, Iter, Ring};
use crate::pretty::Pretty;
use crate::traits::{AddressableHeap, MergeableHeap};
use crate::{Error, Result};

/// An addressable Fibonacci heap.
///
/// Stores values under keys; the key can be thought of as the priority of the value
/// that is associated to it. Which key is the smallest is decided by the comparator
/// `C`, which defaults to the natural order of `Ord` keys.
///
/// Inserting an element returns a `Handle` that stays valid until the element leaves
/// the heap, including across merges.
///
/// | operation      | amortized cost |
/// |----------------|----------------|
/// | `push`         | O(1)           |
/// | `peek`         | O(1)           |
/// | `pop`          | O(log n)       |
/// | `decrease_key` | O(1)           |
/// | `remove`       | O(log n)       |
/// | `append`       | O(1) in the number of elements |
///
/// ```
/// use fibonacci_heap::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// let a = heap.push(5, "a");
/// heap.push(3, "b");
/// heap.decrease_key(a, 1).unwrap();
/// assert_eq!(heap.pop(), Some((1, "a")));
/// assert_eq!(heap.pop(), Some((3, "b")));
/// assert_eq!(heap.pop(), None);
/// ```
pub struct FibonacciHeap<K, V = (), C = MinOrder> {
	/// The root with the minimum key, undefined iff the heap is empty.
	min: NodeIx,
	/// All nodes of the forest.
	forest: Forest<K, V>,
	cmp: C,
}

impl<K, V> FibonacciHeap<K, V, MinOrder>
where
	K: Ord,
{
	/// Creates a new, empty min-heap ordered by the natural order of `K`.
	#[inline]
	pub fn new() -> Self {
		Self::with_comparator(MinOrder)
	}
}

impl<K, V, C> FibonacciHeap<K, V, C> {
	/// Creates a new, empty heap ordered by the given comparator.
	pub fn with_comparator(cmp: C) -> Self {
		FibonacciHeap {
			min: NodeIx::undef(),
			forest: Forest::new(),
			cmp,
		}
	}

	/// Returns the comparator ordering this heap.
	#[inline]
	pub fn comparator(&self) -> &C {
		&self.cmp
	}

	/// Returns the number of elements stored in this heap.
	#[inline]
	pub fn len(&self) -> usize {
		self.forest.len()
	}

	/// Returns `true` if this heap is empty.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	#[inline]
	pub(crate) fn node(&self, ix: NodeIx) -> &Node<K, V> {
		self.forest.node(ix)
	}

	#[inline]
	fn node_mut(&mut self, ix: NodeIx) -> &mut Node<K, V> {
		self.forest.node_mut(ix)
	}

	/// Returns the root holding the minimum key, or `None` if the heap is empty.
	#[inline]
	pub(crate) fn min_root(&self) -> Option<NodeIx> {
		match self.min.is_undef() {
			true => None,
			false => Some(self.min),
		}
	}

	/// Iterates over the ring that contains `start`, beginning with `start`.
	#[inline]
	pub(crate) fn ring(&self, start: NodeIx) -> Ring<'_, K, V> {
		Ring::new(&self.forest, start)
	}

	/// Iterates over the children of the given node.
	#[inline]
	pub(crate) fn children(&self, ix: NodeIx) -> Ring<'_, K, V> {
		let first = self.forest.child(ix).unwrap_or_else(NodeIx::undef);
		Ring::new(&self.forest, first)
	}

	/// Like `Forest::lookup` but rejects stale and foreign handles with an error.
	fn resolve(&self, handle: Handle) -> Result<NodeIx> {
		self.forest.lookup(handle).ok_or_else(|| {
			debug!(?handle, "rejected invalid handle");
			Error::InvalidHandle
		})
	}

	/// Concatenates the ring containing `b` into the ring containing `a`, right after `a`.
	fn splice(&mut self, a: NodeIx, b: NodeIx) {
		let a_right = self.forest.right(a);
		let b_left = self.forest.left(b);
		self.forest.set_right(a, b);
		self.forest.set_left(b, a);
		self.forest.set_right(b_left, a_right);
		self.forest.set_left(a_right, b_left);
	}

	/// Detaches the given node from its siblings, leaving it in a ring of its own.
	fn unlink(&mut self, ix: NodeIx) {
		let left = self.forest.left(ix);
		let right = self.forest.right(ix);
		self.forest.set_right(left, right);
		self.forest.set_left(right, left);
		self.forest.set_left(ix, ix);
		self.forest.set_right(ix, ix);
	}

	/// Returns a reference to the element associated with the given handle.
	#[inline]
	pub fn get(&self, handle: Handle) -> Option<&V> {
		self.forest.lookup(handle).map(|ix| &self.node(ix).value)
	}

	/// Returns a mutable reference to the element associated with the given handle.
	#[inline]
	pub fn get_mut(&mut self, handle: Handle) -> Option<&mut V> {
		match self.forest.lookup(handle) {
			Some(ix) => Some(&mut self.node_mut(ix).value),
			None => None,
		}
	}

	/// Returns the current key of the element associated with the given handle.
	#[inline]
	pub fn key(&self, handle: Handle) -> Option<&K> {
		self.forest.lookup(handle).map(|ix| &self.node(ix).key)
	}

	/// Returns `true` if the given handle refers to an element stored in this heap.
	#[inline]
	pub fn contains(&self, handle: Handle) -> bool {
		self.forest.lookup(handle).is_some()
	}

	/// Returns the minimum key and its value if not empty.
	#[inline]
	pub fn peek(&self) -> Option<(&K, &V)> {
		self.forest
			.get(self.min)
			.map(|node| (&node.key, &node.value))
	}

	/// Returns the minimum key and its value.
	///
	/// # Errors
	///
	/// `Error::EmptyHeap` if the heap is empty.
	#[inline]
	pub fn peek_min(&self) -> Result<(&K, &V)> {
		self.peek().ok_or(Error::EmptyHeap)
	}

	/// Returns a mutable reference to the value associated with the minimum key.
	#[inline]
	pub fn peek_mut(&mut self) -> Option<&mut V> {
		let min = self.min;
		self.forest.get_mut(min).map(|node| &mut node.value)
	}

	/// Iterates over all keys and values in unspecified order.
	#[inline]
	pub fn iter(&self) -> Iter<'_, K, V> {
		Iter::new(&self.forest, self.min_root())
	}

	/// Iterates over all values by mutable reference in unspecified order.
	#[inline]
	pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> + '_ {
		self.forest.values_mut()
	}

	/// Renders the forest of this heap, one node per line.
	///
	/// Marked nodes are suffixed with `*`.
	#[inline]
	pub fn pretty(&self) -> Pretty<'_, K, V, C> {
		Pretty::new(self)
	}

	/// Removes all elements.
	///
	/// Every handle issued for this heap so far becomes invalid.
	pub fn clear(&mut self) {
		self.min = NodeIx::undef();
		self.forest = Forest::new();
	}
}

impl<K, V, C> FibonacciHeap<K, V, C>
where
	C: Compare<K>,
{
	/// Returns `true` if the key at `a` is strictly smaller than the key at `b`.
	#[inline]
	fn less(&self, a: NodeIx, b: NodeIx) -> bool {
		self.cmp.less(&self.node(a).key, &self.node(b).key)
	}

	/// Updates the minimum by hinting to a root that might hold a smaller key.
	#[inline]
	fn update_min(&mut self, root: NodeIx) {
		debug_assert!(self.node(root).is_root());
		if self.min.is_undef() || self.less(root, self.min) {
			self.min = root;
		}
	}

	/// Splices the given single node into the root ring and checks whether it is the new minimum.
	fn insert_root(&mut self, root: NodeIx) {
		debug_assert_eq!(self.forest.right(root), root, "only single nodes become roots");
		self.forest.set_parent(root, None);
		self.node_mut(root).marked = false;
		let min = self.min;
		match min.is_undef() {
			true => self.min = root,
			false => {
				self.splice(min, root);
				self.update_min(root);
			}
		}
	}

	/// Makes the given single node a child of `parent`.
	fn add_child(&mut self, parent: NodeIx, child: NodeIx) {
		debug_assert!(parent != child, "cannot link to self!");
		debug_assert_eq!(self.forest.right(child), child, "child must be detached");
		self.forest.set_parent(child, Some(parent));
		self.node_mut(child).marked = false;
		match self.forest.child(parent) {
			None => self.forest.set_child(parent, Some(child)),
			Some(first) => self.splice(first, child),
		}
		self.node_mut(parent).degree += 1;
	}

	/// Cuts the given `child` from its parent and inserts it as a root.
	fn cut(&mut self, child: NodeIx) {
		debug_assert!(!self.node(child).is_root());

		let parent = match self.forest.parent(child) {
			Some(parent) => parent,
			None => unsafe { ::unreachable::unreachable() },
		};
		let right = self.forest.right(child);
		if right == child {
			self.forest.set_child(parent, None);
		} else {
			if self.forest.child(parent) == Some(child) {
				self.forest.set_child(parent, Some(right));
			}
			self.unlink(child);
		}
		self.node_mut(parent).degree -= 1;
		self.insert_root(child);
	}

	/// Walks upwards from a node that just lost a child.
	///
	/// Marked ancestors are cut until a root or an unmarked node is reached, which is
	/// marked unless it is a root.
	fn cascading_cut(&mut self, mut ix: NodeIx) {
		let mut cuts = 0usize;
		while let Some(parent) = self.forest.parent(ix) {
			if !self.node(ix).marked {
				self.node_mut(ix).marked = true;
				break;
			}
			self.cut(ix);
			cuts += 1;
			ix = parent;
		}
		if cuts > 0 {
			trace!(cuts, "cascading cut");
		}
	}

	/// Links roots of equal degree until all root degrees are distinct and
	/// recomputes the minimum root.
	fn consolidate(&mut self) {
		let roots = self.ring(self.min).collect::<Vec<_>>();
		let mut by_degree: Vec<Option<NodeIx>> = Vec::new();
		for &root in &roots {
			let mut tree = root;
			loop {
				let degree = self.node(tree).degree;
				if degree >= by_degree.len() {
					by_degree.resize(degree + 1, None);
				}
				match by_degree[degree].take() {
					None => {
						by_degree[degree] = Some(tree);
						break;
					}
					Some(other) => {
						let (upper, lower) = match self.less(other, tree) {
							true => (other, tree),
							false => (tree, other),
						};
						self.unlink(lower);
						self.add_child(upper, lower);
						tree = upper;
					}
				}
			}
		}
		self.min = NodeIx::undef();
		let mut survivors = 0usize;
		for tree in by_degree.into_iter().flatten() {
			self.update_min(tree);
			survivors += 1;
		}
		trace!(
			roots = roots.len(),
			survivors,
			"consolidated root ring"
		);
	}

	/// Inserts `value` under `key` and returns a `Handle` to it.
	///
	/// The handle is required in order to use methods like `decrease_key` or `remove`.
	#[inline]
	pub fn push(&mut self, key: K, value: V) -> Handle {
		let ix = self.forest.alloc(key, value);
		self.insert_root(ix);
		self.forest.handle_of(ix)
	}

	/// Removes the minimum key and its value and returns them, or `None` if empty.
	#[inline]
	pub fn pop(&mut self) -> Option<(K, V)> {
		match self.is_empty() {
			true => None,
			false => unsafe { Some(self.pop_unchecked()) },
		}
	}

	/// Removes the minimum key and its value and returns them.
	///
	/// # Errors
	///
	/// `Error::EmptyHeap` if the heap is empty.
	#[inline]
	pub fn extract_min(&mut self) -> Result<(K, V)> {
		self.pop().ok_or(Error::EmptyHeap)
	}

	/// Removes the minimum key and its value without checking for emptiness.
	///
	/// So use this method carefully!
	pub unsafe fn pop_unchecked(&mut self) -> (K, V) {
		let min = self.min;
		if let Some(first) = self.forest.child(min) {
			let mut child = first;
			loop {
				self.forest.set_parent(child, None);
				self.node_mut(child).marked = false;
				child = self.forest.right(child);
				if child == first {
					break;
				}
			}
			self.forest.set_child(min, None);
			self.splice(min, first);
		}
		let next = self.forest.right(min);
		if next == min {
			self.min = NodeIx::undef();
		} else {
			self.unlink(min);
			self.min = next;
			self.consolidate();
		}
		let node = self.forest.release(min);
		(node.key, node.value)
	}

	/// Decreases the key of the element associated with the given `handle`.
	///
	/// A `new_key` equal to the current key replaces it without restructuring.
	///
	/// # Errors
	///
	/// - `Error::InvalidHandle` if the handle does not refer to an element of this heap.
	/// - `Error::DecreaseKeyOutOfOrder` if `new_key` is greater than the current key,
	///   in which case the key is left unchanged.
	pub fn decrease_key(&mut self, handle: Handle, new_key: K) -> Result<()> {
		let ix = self.resolve(handle)?;
		let ordering = self.cmp.compare(&new_key, &self.node(ix).key);
		if ordering == Ordering::Greater {
			debug!(?handle, "rejected key increase");
			return Err(Error::DecreaseKeyOutOfOrder);
		}

		self.node_mut(ix).key = new_key;
		if ordering == Ordering::Equal {
			return Ok(());
		}
		match self.forest.parent(ix) {
			None => self.update_min(ix),
			Some(parent) => {
				if self.less(ix, parent) {
					self.cut(ix);
					self.cascading_cut(parent);
				}
			}
		}
		Ok(())
	}

	/// Removes the element associated with the given `handle` and returns its key and value.
	///
	/// Behaves as if the key was decreased below every other key and then popped.
	///
	/// # Errors
	///
	/// `Error::InvalidHandle` if the handle does not refer to an element of this heap.
	pub fn remove(&mut self, handle: Handle) -> Result<(K, V)> {
		let ix = self.resolve(handle)?;
		if let Some(parent) = self.forest.parent(ix) {
			self.cut(ix);
			self.cascading_cut(parent);
		}
		self.min = ix;
		Ok(unsafe { self.pop_unchecked() })
	}

	/// Moves all elements of `other` into this heap.
	///
	/// The root rings of both heaps are spliced into one; no element is moved or
	/// copied, and handles issued for either heap stay valid for the merged heap.
	///
	/// The merged heap keeps the comparator of `self`. The trees of `other` were built
	/// by the comparator of `other`, so both comparators have to order keys the same
	/// way, otherwise the merged heap hands out elements in the wrong order. This only
	/// matters for comparators carrying state, like `FnOrder` over function pointers.
	pub fn append(&mut self, mut other: Self) {
		if other.is_empty() {
			return;
		}
		// keep the longer arena list in place so only the shorter one moves
		if self.forest.arena_count() < other.forest.arena_count() {
			mem::swap(&mut self.forest, &mut other.forest);
			mem::swap(&mut self.min, &mut other.min);
		}
		let moved = other.forest.arena_count();
		let other_min = self.forest.absorb(other.forest, other.min);
		match (self.min_root(), other_min.is_undef()) {
			(_, true) => {}
			(None, false) => self.min = other_min,
			(Some(min), false) => {
				self.splice(min, other_min);
				self.update_min(other_min);
			}
		}
		trace!(arenas = moved, "absorbed heap");
	}

	/// Consumes both heaps and returns a heap holding the elements of both.
	///
	/// See `append` for the requirements on the comparators.
	#[inline]
	pub fn merge(mut self, other: Self) -> Self {
		self.append(other);
		self
	}

	/// Returns `true` if some stored key compares equal to `key`.
	///
	/// Subtrees whose root is greater than `key` are skipped.
	pub fn contains_key(&self, key: &K) -> bool {
		let mut pending = match self.min_root() {
			Some(min) => self.ring(min).collect::<Vec<_>>(),
			None => return false,
		};
		while let Some(ix) = pending.pop() {
			match self.cmp.compare(&self.node(ix).key, key) {
				Ordering::Equal => return true,
				Ordering::Greater => {}
				Ordering::Less => pending.extend(self.children(ix)),
			}
		}
		false
	}

	/// Iterate over keys and values in a sorted-by-min order. Drains the heap.
	#[inline]
	pub fn drain_min(self) -> DrainMin<K, V, C> {
		DrainMin::new(self)
	}

	/// Consumes the heap and returns its elements in non-decreasing key order.
	pub fn into_sorted_vec(self) -> Vec<(K, V)> {
		self.drain_min().collect()
	}
}

impl<K, V, C> Default for FibonacciHeap<K, V, C>
where
	C: Compare<K> + Default,
{
	fn default() -> Self {
		Self::with_comparator(C::default())
	}
}

impl<K, V, C> Clone for FibonacciHeap<K, V, C>
where
	K: Clone,
	V: Clone,
	C: Clone,
{
	/// Clones the heap under a new identity: handles of `self` are not valid for the clone.
	fn clone(&self) -> Self {
		FibonacciHeap {
			min: self.min,
			forest: self.forest.clone(),
			cmp: self.cmp.clone(),
		}
	}
}

impl<K, V, C> fmt::Debug for FibonacciHeap<K, V, C>
where
	K: fmt::Debug,
	V: fmt::Debug,
{
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_struct("FibonacciHeap")
			.field("len", &self.len())
			.field("min", &self.peek())
			.field("entries", &self.iter().collect::<Vec<_>>())
			.finish()
	}
}

impl<K, V, C> Index<Handle> for FibonacciHeap<K, V, C> {
	type Output = V;

	fn index(&self, handle: Handle) -> &Self::Output {
		self.get(handle).expect("no element found for given handle")
	}
}

impl<K, V, C> IndexMut<Handle> for FibonacciHeap<K, V, C> {
	fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
		self.get_mut(handle)
			.expect("no element found for given handle")
	}
}

impl<K, V, C> Extend<(K, V)> for FibonacciHeap<K, V, C>
where
	C: Compare<K>,
{
	fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
		for (key, value) in iter {
			self.push(key, value);
		}
	}
}

impl<K, V, C> std::iter::FromIterator<(K, V)> for FibonacciHeap<K, V, C>
where
	C: Compare<K> + Default,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut heap = Self::default();
		heap.extend(iter);
		heap
	}
}

impl<K, V, C> MergeableHeap<K, V> for FibonacciHeap<K, V, C>
where
	C: Compare<K>,
{
	type Handle = Handle;

	#[inline]
	fn insert(&mut self, key: K, value: V) -> Handle {
		self.push(key, value)
	}

	#[inline]
	fn peek_min(&self) -> Result<(&K, &V)> {
		FibonacciHeap::peek_min(self)
	}

	#[inline]
	fn extract_min(&mut self) -> Result<(K, V)> {
		FibonacciHeap::extract_min(self)
	}

	#[inline]
	fn merge(self, other: Self) -> Self {
		FibonacciHeap::merge(self, other)
	}

	#[inline]
	fn len(&self) -> usize {
		FibonacciHeap::len(self)
	}
}

impl<K, V, C> AddressableHeap<K, V> for FibonacciHeap<K, V, C>
where
	C: Compare<K>,
{
	#[inline]
	fn decrease_key(&mut self, handle: Handle, new_key: K) -> Result<()> {
		FibonacciHeap::decrease_key(self, handle, new_key)
	}

	#[inline]
	fn delete(&mut self, handle: Handle) -> Result<(K, V)> {
		self.remove(handle)
	}
}
