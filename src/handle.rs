//! Handles into a `FibonacciHeap` and the arena indices behind them.

use std::sync::atomic::{AtomicU64, Ordering};

/// Index of a node slot within a single arena.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub(crate) struct SlotIx(usize);

impl From<usize> for SlotIx {
	fn from(val: usize) -> SlotIx {
		SlotIx(val)
	}
}

impl From<SlotIx> for usize {
	fn from(ix: SlotIx) -> usize {
		ix.0
	}
}

/// Address of a node within the arenas of one heap: the position of its arena in
/// the heap's arena list and its slot within that arena.
///
/// Node links (parent, child and both ring neighbours) are addresses, never
/// references, so cuts and splices are plain index rewrites.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub(crate) struct NodeIx {
	arena: usize,
	slot: SlotIx,
}

impl NodeIx {
	#[inline]
	pub(crate) fn new(arena: usize, slot: SlotIx) -> Self {
		NodeIx { arena, slot }
	}

	#[inline]
	pub(crate) fn undef() -> Self {
		NodeIx::new(usize::MAX, SlotIx(usize::MAX))
	}

	#[inline]
	pub(crate) fn is_undef(self) -> bool {
		self == NodeIx::undef()
	}

	#[inline]
	pub(crate) fn arena(self) -> usize {
		self.arena
	}

	#[inline]
	pub(crate) fn slot(self) -> SlotIx {
		self.slot
	}
}

/// Process-unique identity of an arena.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub(crate) struct ArenaId(u64);

static NEXT_ARENA_ID: AtomicU64 = AtomicU64::new(0);

impl ArenaId {
	/// Returns an identity that no other arena in this process has been given.
	pub(crate) fn fresh() -> Self {
		ArenaId(NEXT_ARENA_ID.fetch_add(1, Ordering::Relaxed))
	}
}

/// A handle to an element stored within a `FibonacciHeap`.
///
/// Handles are returned by `push` and are required by `decrease_key` and `remove`.
/// They stay valid while the element they refer to is stored in a heap, no matter how
/// often the element is cut or relinked internally. Merging carries the elements of
/// the absorbed heap over together with the validity of their handles.
///
/// A handle becomes invalid once its element is popped or removed, or once its heap
/// is cleared. Handles of a heap are not valid for clones of it. Invalid handles are
/// detected and rejected with `Error::InvalidHandle`; they never alias an element that
/// later reuses the same slot.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Handle {
	arena: ArenaId,
	slot: SlotIx,
	generation: u64,
}

impl Handle {
	#[inline]
	pub(crate) fn new(arena: ArenaId, slot: SlotIx, generation: u64) -> Self {
		Handle {
			arena,
			slot,
			generation,
		}
	}

	#[inline]
	pub(crate) fn arena(self) -> ArenaId {
		self.arena
	}

	#[inline]
	pub(crate) fn slot(self) -> SlotIx {
		self.slot
	}

	#[inline]
	pub(crate) fn generation(self) -> u64 {
		self.generation
	}
}
