//! Node storage of a heap.
//!
//! A heap owns a list of arenas. It allocates into the first one; the others were
//! taken over from absorbed heaps. Each arena carries a process-unique `ArenaId`
//! that the handles into it refer to, and a generation per slot that is bumped
//! whenever the slot is freed.
//!
//! Links between nodes are stored relative to the `origin` of the arena holding the
//! linking node. Appending the arena list of another heap therefore shifts one origin
//! per moved arena and never rewrites a node.

use std::collections::HashMap;

use stash::Stash;

use crate::handle::{ArenaId, Handle, NodeIx, SlotIx};

/// A node address as stored within a node, relative to the origin of its arena.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Link {
	arena: usize,
	slot: SlotIx,
}

#[derive(Debug, Clone)]
pub(crate) struct Node<K, V> {
	pub(crate) key: K,
	pub(crate) value: V,
	pub(crate) degree: usize,
	pub(crate) marked: bool,
	parent: Option<Link>,
	child: Option<Link>,
	left: Link,
	right: Link,
}

impl<K, V> Node<K, V> {
	#[inline]
	pub(crate) fn is_root(&self) -> bool {
		self.parent.is_none()
	}
}

#[derive(Clone)]
struct Arena<K, V> {
	id: ArenaId,
	origin: usize,
	nodes: Stash<Node<K, V>, SlotIx>,
	generations: Vec<u64>,
}

impl<K, V> Arena<K, V> {
	fn new() -> Self {
		Arena {
			id: ArenaId::fresh(),
			origin: 0,
			nodes: Stash::default(),
			generations: Vec::new(),
		}
	}
}

/// All nodes of one heap.
pub(crate) struct Forest<K, V> {
	arenas: Vec<Arena<K, V>>,
	positions: HashMap<ArenaId, usize>,
	len: usize,
}

impl<K, V> Forest<K, V> {
	/// Creates an empty forest backed by a single fresh arena.
	pub(crate) fn new() -> Self {
		Self::from_arenas(vec![Arena::new()], 0)
	}

	fn from_arenas(arenas: Vec<Arena<K, V>>, len: usize) -> Self {
		let positions = arenas
			.iter()
			.enumerate()
			.map(|(position, arena)| (arena.id, position))
			.collect();
		Forest {
			arenas,
			positions,
			len,
		}
	}

	#[inline]
	pub(crate) fn len(&self) -> usize {
		self.len
	}

	#[inline]
	pub(crate) fn arena_count(&self) -> usize {
		self.arenas.len()
	}

	#[inline]
	pub(crate) fn get(&self, ix: NodeIx) -> Option<&Node<K, V>> {
		self.arenas
			.get(ix.arena())
			.and_then(|arena| arena.nodes.get(ix.slot()))
	}

	#[inline]
	pub(crate) fn get_mut(&mut self, ix: NodeIx) -> Option<&mut Node<K, V>> {
		self.arenas
			.get_mut(ix.arena())
			.and_then(|arena| arena.nodes.get_mut(ix.slot()))
	}

	/// Returns the node stored at `ix`.
	///
	/// Every link stored within the forest refers to a live node, so this won't fail
	/// for a correct implementation of `FibonacciHeap`.
	#[inline]
	pub(crate) fn node(&self, ix: NodeIx) -> &Node<K, V> {
		debug_assert!(self.get(ix).is_some(), "dangling node link: {:?}", ix);
		unsafe {
			self.arenas
				.get_unchecked(ix.arena())
				.nodes
				.get_unchecked(ix.slot())
		}
	}

	#[inline]
	pub(crate) fn node_mut(&mut self, ix: NodeIx) -> &mut Node<K, V> {
		debug_assert!(self.get(ix).is_some(), "dangling node link: {:?}", ix);
		unsafe {
			self.arenas
				.get_unchecked_mut(ix.arena())
				.nodes
				.get_unchecked_mut(ix.slot())
		}
	}

	#[inline]
	fn origin(&self, ix: NodeIx) -> usize {
		debug_assert!(ix.arena() < self.arenas.len());
		unsafe { self.arenas.get_unchecked(ix.arena()).origin }
	}

	/// Turns a link stored within the node at `from` into an address.
	#[inline]
	fn follow(&self, from: NodeIx, link: Link) -> NodeIx {
		NodeIx::new(link.arena.wrapping_add(self.origin(from)), link.slot)
	}

	/// Turns an address into a link that can be stored within the node at `from`.
	#[inline]
	fn link(&self, from: NodeIx, to: NodeIx) -> Link {
		Link {
			arena: to.arena().wrapping_sub(self.origin(from)),
			slot: to.slot(),
		}
	}

	#[inline]
	pub(crate) fn left(&self, ix: NodeIx) -> NodeIx {
		self.follow(ix, self.node(ix).left)
	}

	#[inline]
	pub(crate) fn right(&self, ix: NodeIx) -> NodeIx {
		self.follow(ix, self.node(ix).right)
	}

	#[inline]
	pub(crate) fn parent(&self, ix: NodeIx) -> Option<NodeIx> {
		self.node(ix).parent.map(|link| self.follow(ix, link))
	}

	#[inline]
	pub(crate) fn child(&self, ix: NodeIx) -> Option<NodeIx> {
		self.node(ix).child.map(|link| self.follow(ix, link))
	}

	#[inline]
	pub(crate) fn set_left(&mut self, ix: NodeIx, to: NodeIx) {
		let link = self.link(ix, to);
		self.node_mut(ix).left = link;
	}

	#[inline]
	pub(crate) fn set_right(&mut self, ix: NodeIx, to: NodeIx) {
		let link = self.link(ix, to);
		self.node_mut(ix).right = link;
	}

	#[inline]
	pub(crate) fn set_parent(&mut self, ix: NodeIx, to: Option<NodeIx>) {
		let link = to.map(|to| self.link(ix, to));
		self.node_mut(ix).parent = link;
	}

	#[inline]
	pub(crate) fn set_child(&mut self, ix: NodeIx, to: Option<NodeIx>) {
		let link = to.map(|to| self.link(ix, to));
		self.node_mut(ix).child = link;
	}

	/// Stores a new node that forms a ring of its own.
	pub(crate) fn alloc(&mut self, key: K, value: V) -> NodeIx {
		let dangling = Link {
			arena: usize::MAX,
			slot: SlotIx::from(usize::MAX),
		};
		let home = &mut self.arenas[0];
		let slot = home.nodes.put(Node {
			key,
			value,
			degree: 0,
			marked: false,
			parent: None,
			child: None,
			left: dangling,
			right: dangling,
		});
		if usize::from(slot) >= home.generations.len() {
			home.generations.resize(usize::from(slot) + 1, 0);
		}
		self.len += 1;
		let ix = NodeIx::new(0, slot);
		self.set_left(ix, ix);
		self.set_right(ix, ix);
		ix
	}

	/// Frees the slot of the given node, invalidating every handle that addresses it.
	///
	/// The node must already be detached from the forest.
	pub(crate) fn release(&mut self, ix: NodeIx) -> Node<K, V> {
		self.len -= 1;
		let arena = &mut self.arenas[ix.arena()];
		let generation = &mut arena.generations[usize::from(ix.slot())];
		*generation = generation.wrapping_add(1);
		unsafe { arena.nodes.take_unchecked(ix.slot()) }
	}

	/// Returns the handle addressing the live node at `ix`.
	pub(crate) fn handle_of(&self, ix: NodeIx) -> Handle {
		let arena = &self.arenas[ix.arena()];
		Handle::new(
			arena.id,
			ix.slot(),
			arena.generations[usize::from(ix.slot())],
		)
	}

	/// Returns the address of the node `handle` refers to if it is still stored here.
	pub(crate) fn lookup(&self, handle: Handle) -> Option<NodeIx> {
		let &position = self.positions.get(&handle.arena())?;
		let arena = &self.arenas[position];
		let slot = handle.slot();
		let live = arena.generations.get(usize::from(slot)) == Some(&handle.generation())
			&& arena.nodes.get(slot).is_some();
		match live {
			true => Some(NodeIx::new(position, slot)),
			false => None,
		}
	}

	/// Moves all arenas of `other` behind the arenas of this forest.
	///
	/// Returns the address `ix`, a node of `other` or undefined, has from now on.
	/// Costs one step per moved arena, independent of the number of nodes.
	pub(crate) fn absorb(&mut self, other: Forest<K, V>, ix: NodeIx) -> NodeIx {
		let shift = self.arenas.len();
		self.len += other.len;
		for mut arena in other.arenas {
			arena.origin = arena.origin.wrapping_add(shift);
			self.positions.insert(arena.id, self.arenas.len());
			self.arenas.push(arena);
		}
		match ix.is_undef() {
			true => ix,
			false => NodeIx::new(ix.arena() + shift, ix.slot()),
		}
	}

	/// Iterates over all values by mutable reference in unspecified order.
	pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut V> + '_ {
		self.arenas
			.iter_mut()
			.flat_map(|arena| arena.nodes.values_mut())
			.map(|node| &mut node.value)
	}
}

impl<K, V> Clone for Forest<K, V>
where
	K: Clone,
	V: Clone,
{
	/// Clones every arena under a new identity, so handles into `self` are rejected
	/// by the clone.
	fn clone(&self) -> Self {
		let arenas = self
			.arenas
			.iter()
			.map(|arena| Arena {
				id: ArenaId::fresh(),
				..arena.clone()
			})
			.collect();
		Self::from_arenas(arenas, self.len)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Builds a forest holding one ring of the given keys and returns their addresses.
	fn ring_of(keys: &[i32]) -> (Forest<i32, ()>, Vec<NodeIx>) {
		let mut forest = Forest::new();
		let ixs = keys
			.iter()
			.map(|&key| forest.alloc(key, ()))
			.collect::<Vec<_>>();
		for (&a, &b) in ixs.iter().zip(ixs.iter().cycle().skip(1)) {
			forest.set_right(a, b);
			forest.set_left(b, a);
		}
		(forest, ixs)
	}

	#[test]
	fn alloc_forms_single_ring() {
		let mut forest = Forest::<u8, ()>::new();
		let ix = forest.alloc(1, ());
		assert_eq!(forest.left(ix), ix);
		assert_eq!(forest.right(ix), ix);
		assert_eq!(forest.parent(ix), None);
		assert_eq!(forest.child(ix), None);
		assert_eq!(forest.len(), 1);
	}

	#[test]
	fn release_bumps_generation() {
		let mut forest = Forest::new();
		let ix = forest.alloc('a', ());
		let handle = forest.handle_of(ix);
		assert_eq!(forest.lookup(handle), Some(ix));
		assert_eq!(forest.release(ix).key, 'a');
		assert_eq!(forest.lookup(handle), None);
		let again = forest.alloc('b', ());
		assert_eq!(again, ix);
		assert_eq!(forest.lookup(handle), None);
		assert_eq!(forest.lookup(forest.handle_of(again)), Some(again));
	}

	#[test]
	fn absorb_keeps_links_and_handles() {
		let (mut left, _) = ring_of(&[1, 2]);
		let (right, ixs) = ring_of(&[10, 20, 30]);
		let handles = ixs.iter().map(|&ix| right.handle_of(ix)).collect::<Vec<_>>();

		let first = left.absorb(right, ixs[0]);
		assert_eq!(left.len(), 5);
		assert_eq!(left.arena_count(), 2);
		assert_eq!(first.arena(), 1);
		assert_eq!(left.node(first).key, 10);
		assert_eq!(left.node(left.right(first)).key, 20);
		assert_eq!(left.node(left.left(first)).key, 30);
		for (handle, &key) in handles.iter().zip(&[10, 20, 30]) {
			let ix = left.lookup(*handle).unwrap();
			assert_eq!(left.node(ix).key, key);
		}
	}

	#[test]
	fn links_across_arenas_survive_a_second_absorb() {
		let (mut a, a_ixs) = ring_of(&[1]);
		let (b, b_ixs) = ring_of(&[2]);
		let b0 = a.absorb(b, b_ixs[0]);
		// link nodes of two different arenas with each other
		a.set_child(a_ixs[0], Some(b0));
		a.set_parent(b0, Some(a_ixs[0]));

		let (mut c, _) = ring_of(&[3]);
		let (d, _) = ring_of(&[4]);
		let d0 = c.absorb(d, NodeIx::undef());
		assert!(d0.is_undef());
		let a0 = c.absorb(a, a_ixs[0]);
		let b0 = c.child(a0).unwrap();
		assert_eq!(c.node(a0).key, 1);
		assert_eq!(c.node(b0).key, 2);
		assert_eq!(c.parent(b0), Some(a0));
		assert_eq!(c.arena_count(), 4);
	}

	#[test]
	fn clones_reject_original_handles() {
		let (forest, ixs) = ring_of(&[5, 6]);
		let handle = forest.handle_of(ixs[1]);
		let copy = forest.clone();
		assert_eq!(copy.len(), 2);
		assert_eq!(copy.lookup(handle), None);
		assert_eq!(copy.node(copy.right(ixs[0])).key, 6);
	}

	#[test]
	fn values_mut_covers_all_arenas() {
		let mut forest = Forest::new();
		forest.alloc(1, 1);
		let mut other = Forest::new();
		other.alloc(2, 2);
		forest.absorb(other, NodeIx::undef());
		for value in forest.values_mut() {
			*value *= 10;
		}
		let mut values = forest
			.arenas
			.iter()
			.flat_map(|arena| arena.nodes.values())
			.map(|node| node.value)
			.collect::<Vec<_>>();
		values.sort();
		assert_eq!(values, vec![10, 20]);
	}
}
