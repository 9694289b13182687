//! A textual rendering of the forest of a `FibonacciHeap`.

use std::fmt;

use crate::fibonacci::FibonacciHeap;
use crate::handle::NodeIx;

/// Renders every tree of a heap, one node per line, children indented below their
/// parent. Marked nodes are suffixed with `*`. Created by `FibonacciHeap::pretty`.
///
/// ```
/// use fibonacci_heap::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// heap.push(1, ());
/// heap.push(2, ());
/// heap.push(3, ());
/// heap.pop();
/// assert_eq!(heap.pretty().to_string(), "2\n`-- 3\n");
/// ```
pub struct Pretty<'a, K: 'a, V: 'a, C: 'a> {
	heap: &'a FibonacciHeap<K, V, C>,
}

impl<'a, K, V, C> Pretty<'a, K, V, C> {
	pub(crate) fn new(heap: &'a FibonacciHeap<K, V, C>) -> Self {
		Pretty { heap }
	}
}

/// A node waiting to be written together with the indentation of its line.
struct Line {
	ix: NodeIx,
	indent: String,
	branch: &'static str,
	last: bool,
}

impl<'a, K, V, C> fmt::Display for Pretty<'a, K, V, C>
where
	K: fmt::Debug,
{
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let min = match self.heap.min_root() {
			Some(min) => min,
			None => return writeln!(f, "(empty)"),
		};
		let mut pending = self
			.heap
			.ring(min)
			.map(|root| Line {
				ix: root,
				indent: String::new(),
				branch: "",
				last: true,
			})
			.collect::<Vec<_>>();
		pending.reverse();

		while let Some(line) = pending.pop() {
			let node = self.heap.node(line.ix);
			write!(f, "{}{}{:?}", line.indent, line.branch, node.key)?;
			if node.marked {
				write!(f, "*")?;
			}
			writeln!(f)?;

			let children = self.heap.children(line.ix).collect::<Vec<_>>();
			if children.is_empty() {
				continue;
			}
			let indent = match (node.is_root(), line.last) {
				(true, _) => line.indent.clone(),
				(false, true) => format!("{}    ", line.indent),
				(false, false) => format!("{}|   ", line.indent),
			};
			let count = children.len();
			for (n, child) in children.into_iter().enumerate().rev() {
				let last = n + 1 == count;
				pending.push(Line {
					ix: child,
					indent: indent.clone(),
					branch: if last { "`-- " } else { "|-- " },
					last,
				});
			}
		}
		Ok(())
	}
}
