// Copyright © SurrealDB Ltd
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Criterion benchmarks comparing the cursor adapters against std equivalents.
//!
//! This benchmark suite compares:
//! - `FilteringCursor` - against `Iterator::filter` over a slice
//! - `FilteringCursor::remove` - against `Vec::retain`
//! - `MergeCursor` - against concatenating all runs and sorting the result
//!
//! The std versions do strictly less work (no backward traversal, no
//! mutation through the view), so they mark the floor for each operation.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use cursor_adapters::{BidiCursor, Cursor, ListCursor, MergeCursor, SliceCursor};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

const SEED: u64 = 42;

// ============================================================================
// Helper Functions
// ============================================================================

/// Generate random values using a seeded RNG
fn random_values(count: usize) -> Vec<i64> {
	let mut rng = StdRng::seed_from_u64(SEED);
	(0..count).map(|_| rng.random_range(0..1_000_000)).collect()
}

/// Split `count` random values into `runs` sorted runs
fn sorted_runs(count: usize, runs: usize) -> Vec<Vec<i64>> {
	let values = random_values(count);
	values
		.chunks(count.div_ceil(runs))
		.map(|chunk| {
			let mut run = chunk.to_vec();
			run.sort_unstable();
			run
		})
		.collect()
}

fn is_selected(x: &i64) -> bool {
	x % 7 == 0
}

// ============================================================================
// Filtering Benchmarks
// ============================================================================

fn bench_filter_forward(c: &mut Criterion) {
	let mut group = c.benchmark_group("filter_forward");

	for count in [1_000, 10_000, 100_000] {
		let values = random_values(count);
		group.throughput(Throughput::Elements(count as u64));

		// FilteringCursor
		group.bench_with_input(BenchmarkId::new("filtering_cursor", count), &values, |b, values| {
			b.iter(|| {
				let mut cursor = SliceCursor::new(values).filter(is_selected);
				let mut sum = 0i64;
				while cursor.has_next() {
					if let Ok(value) = cursor.next() {
						sum += value;
					}
				}
				black_box(sum)
			})
		});

		// ForwardFilteringCursor
		group.bench_with_input(
			BenchmarkId::new("forward_filtering_cursor", count),
			&values,
			|b, values| {
				b.iter(|| {
					let mut cursor = SliceCursor::new(values).filter_forward(is_selected);
					black_box(cursor.iter().sum::<i64>())
				})
			},
		);

		// Iterator::filter
		group.bench_with_input(BenchmarkId::new("iter_filter", count), &values, |b, values| {
			b.iter(|| black_box(values.iter().filter(|x| is_selected(x)).sum::<i64>()))
		});
	}
	group.finish();
}

fn bench_filter_there_and_back(c: &mut Criterion) {
	let mut group = c.benchmark_group("filter_there_and_back");

	for count in [1_000, 10_000, 100_000] {
		let values = random_values(count);
		group.throughput(Throughput::Elements(2 * count as u64));

		// FilteringCursor, full walk forward then backward
		group.bench_with_input(BenchmarkId::new("filtering_cursor", count), &values, |b, values| {
			b.iter(|| {
				let mut cursor = SliceCursor::new(values).filter(is_selected);
				let forward = cursor.iter().count();
				let backward = cursor.rev_iter().count();
				black_box(forward + backward)
			})
		});

		// Collect the matches, then walk them both ways
		group.bench_with_input(BenchmarkId::new("collect_then_rev", count), &values, |b, values| {
			b.iter(|| {
				let matches: Vec<i64> = values.iter().copied().filter(is_selected).collect();
				let forward = matches.iter().count();
				let backward = matches.iter().rev().count();
				black_box(forward + backward)
			})
		});
	}
	group.finish();
}

fn bench_filter_remove(c: &mut Criterion) {
	let mut group = c.benchmark_group("filter_remove");

	for count in [1_000, 10_000] {
		let values = random_values(count);
		group.throughput(Throughput::Elements(count as u64));

		// FilteringCursor over a Vec, peeking before each remove
		group.bench_with_input(BenchmarkId::new("filtering_cursor", count), &values, |b, values| {
			b.iter_batched(
				|| values.clone(),
				|mut list| {
					{
						let mut cursor = ListCursor::new(&mut list).filter(is_selected);
						while cursor.has_next() {
							let _ = cursor.next();
							cursor.has_next();
							black_box(cursor.remove()).ok();
						}
					}
					list
				},
				criterion::BatchSize::SmallInput,
			)
		});

		// Vec::retain
		group.bench_with_input(BenchmarkId::new("vec_retain", count), &values, |b, values| {
			b.iter_batched(
				|| values.clone(),
				|mut list| {
					list.retain(|x| !is_selected(x));
					list
				},
				criterion::BatchSize::SmallInput,
			)
		});
	}
	group.finish();
}

// ============================================================================
// Merge Benchmarks
// ============================================================================

fn bench_merge(c: &mut Criterion) {
	let mut group = c.benchmark_group("merge");
	let count = 100_000;
	group.throughput(Throughput::Elements(count as u64));

	// Source counts on both sides of the inline capacity
	for runs in [2, 4, 8, 32] {
		let sorted = sorted_runs(count, runs);

		// MergeCursor with natural ordering
		group.bench_with_input(BenchmarkId::new("merge_cursor", runs), &sorted, |b, sorted| {
			b.iter(|| {
				let mut merged = MergeCursor::natural(sorted.iter().map(|run| SliceCursor::new(run)));
				black_box(merged.iter().fold(0i64, |acc, x| acc.wrapping_add(x)))
			})
		});

		// MergeCursor with a boxed comparator
		group.bench_with_input(
			BenchmarkId::new("merge_cursor_comparator", runs),
			&sorted,
			|b, sorted| {
				b.iter(|| {
					let mut merged = MergeCursor::with_comparator(
						sorted.iter().map(|run| SliceCursor::new(run)),
						|a: &i64, b: &i64| a.cmp(b),
					);
					black_box(merged.iter().fold(0i64, |acc, x| acc.wrapping_add(x)))
				})
			},
		);

		// Concatenate and sort
		group.bench_with_input(BenchmarkId::new("concat_sort", runs), &sorted, |b, sorted| {
			b.iter(|| {
				let mut all: Vec<i64> = sorted.iter().flatten().copied().collect();
				all.sort();
				black_box(all.iter().fold(0i64, |acc, x| acc.wrapping_add(*x)))
			})
		});
	}
	group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(
	filter_benches,
	bench_filter_forward,
	bench_filter_there_and_back,
	bench_filter_remove,
);

criterion_group!(merge_benches, bench_merge);

criterion_main!(filter_benches, merge_benches);
