//! Behaviour every mergeable and addressable heap has to show, written against the
//! traits only and instantiated for `FibonacciHeap`.

use fibonacci_heap::{AddressableHeap, Error, FibonacciHeap, FnOrder, MaxOrder, MergeableHeap};
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn empty_heap_reports_errors<H>(mut heap: H)
where
	H: MergeableHeap<i32, ()>,
{
	assert!(heap.is_empty());
	assert_eq!(heap.len(), 0);
	assert_eq!(heap.peek_min(), Err(Error::EmptyHeap));
	assert_eq!(heap.extract_min(), Err(Error::EmptyHeap));
}

fn extracts_in_order<H>(mut heap: H, keys: &[i32])
where
	H: MergeableHeap<i32, usize>,
{
	for (n, &key) in keys.iter().enumerate() {
		heap.insert(key, n);
	}
	assert_eq!(heap.len(), keys.len());

	let mut out = Vec::with_capacity(keys.len());
	while let Ok((key, n)) = heap.extract_min() {
		assert_eq!(keys[n], key);
		out.push(key);
	}
	assert!(heap.is_empty());
	assert!(out.iter().tuple_windows().all(|(a, b)| a <= b));
	assert_eq!(out, keys.iter().cloned().sorted().collect::<Vec<_>>());
}

fn merge_keeps_everything<H>(mut a: H, mut b: H)
where
	H: MergeableHeap<i32, char>,
{
	a.insert(4, 'd');
	a.insert(1, 'a');
	b.insert(3, 'c');
	b.insert(2, 'b');
	b.insert(5, 'e');

	let mut merged = a.merge(b);
	assert_eq!(merged.len(), 5);
	assert_eq!(merged.peek_min(), Ok((&1, &'a')));
	let values = (0..5)
		.filter_map(|_| merged.extract_min().ok())
		.map(|(_, value)| value)
		.collect::<String>();
	assert_eq!(values, "abcde");
}

fn merge_with_empty<H>(a: H, mut b: H)
where
	H: MergeableHeap<i32, char>,
{
	b.insert(7, 'x');
	let merged = a.merge(b);
	assert_eq!(merged.len(), 1);
	assert_eq!(merged.peek_min(), Ok((&7, &'x')));
}

fn decrease_key_moves_to_front<H>(mut heap: H)
where
	H: AddressableHeap<i32, &'static str>,
	H::Handle: Copy,
{
	heap.insert(10, "ten");
	let twenty = heap.insert(20, "twenty");
	heap.insert(30, "thirty");

	assert_eq!(heap.decrease_key(twenty, 5), Ok(()));
	assert_eq!(heap.peek_min(), Ok((&5, &"twenty")));
	assert_eq!(heap.decrease_key(twenty, 6), Err(Error::DecreaseKeyOutOfOrder));
	assert_eq!(heap.decrease_key(twenty, 5), Ok(()));
	assert_eq!(heap.extract_min(), Ok((5, "twenty")));
	assert_eq!(heap.decrease_key(twenty, 1), Err(Error::InvalidHandle));
}

fn delete_arbitrary<H>(mut heap: H)
where
	H: AddressableHeap<i32, ()>,
	H::Handle: Copy,
{
	let handles = (0..32).map(|key| heap.insert(key, ())).collect::<Vec<_>>();
	// build trees so deletes hit inner nodes
	assert_eq!(heap.extract_min(), Ok((0, ())));

	for &handle in handles.iter().skip(1).step_by(3) {
		assert!(heap.delete(handle).is_ok());
	}
	assert_eq!(heap.delete(handles[1]), Err(Error::InvalidHandle));
	assert_eq!(heap.delete(handles[0]), Err(Error::InvalidHandle));

	let expected = (1..32).filter(|key| (key - 1) % 3 != 0).collect::<Vec<_>>();
	let mut rest = Vec::new();
	while let Ok((key, ())) = heap.extract_min() {
		rest.push(key);
	}
	assert_eq!(rest, expected);
}

#[test]
fn fibonacci_empty() {
	empty_heap_reports_errors(FibonacciHeap::new());
}

#[test]
fn fibonacci_extract_order() {
	extracts_in_order(FibonacciHeap::new(), &[]);
	extracts_in_order(FibonacciHeap::new(), &[42]);
	extracts_in_order(FibonacciHeap::new(), &[5, 3, 5, 1, 3, -8, 0, 5]);

	let mut rng = StdRng::seed_from_u64(7);
	let keys = (0..1_000).map(|_| rng.gen_range(-100..100)).collect::<Vec<_>>();
	extracts_in_order(FibonacciHeap::new(), &keys);
}

#[test]
fn fibonacci_merge() {
	merge_keeps_everything(FibonacciHeap::new(), FibonacciHeap::new());
	merge_with_empty(FibonacciHeap::new(), FibonacciHeap::new());
}

#[test]
fn fibonacci_decrease_key() {
	decrease_key_moves_to_front(FibonacciHeap::new());
}

#[test]
fn fibonacci_delete() {
	delete_arbitrary(FibonacciHeap::new());
}

#[test]
fn custom_comparators_follow_the_contract() {
	let mut max = FibonacciHeap::with_comparator(MaxOrder);
	for key in [3, 9, 1, 7] {
		max.insert(key, ());
	}
	assert_eq!(MergeableHeap::extract_min(&mut max), Ok((9, ())));

	// by distance to 50
	let mut near = FibonacciHeap::with_comparator(FnOrder(|a: &i32, b: &i32| {
		(a - 50).abs().cmp(&(b - 50).abs())
	}));
	let far = near.insert(0, "far");
	near.insert(45, "close");
	near.insert(90, "farther");
	assert_eq!(MergeableHeap::peek_min(&near), Ok((&45, &"close")));
	assert_eq!(AddressableHeap::decrease_key(&mut near, far, 50), Ok(()));
	assert_eq!(MergeableHeap::extract_min(&mut near), Ok((50, "far")));
	assert_eq!(
		AddressableHeap::decrease_key(&mut near, far, 49),
		Err(Error::InvalidHandle)
	);
}
