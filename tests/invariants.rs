//! # Invariant Testing for Cursor Adapters
//!
//! Randomized walks that interleave every cursor operation (traversal,
//! peeking, `remove`, `set`, `add`) on a filtering cursor and compare each
//! answer with a simple model of the filtered view.
//!
//! - Caches never leak across a direction change
//! - Mutation after peeking lands on the delivered element
//! - Values outside the view are rejected by `set` and `add`, even when
//!   only an inner layer rejects them
//! - The source ends up with exactly the model's visible elements, in order

use cursor_adapters::{BidiCursor, Cursor, Direction, Error, ListCursor};
use rand::prelude::*;
use rand::rngs::StdRng;

// ===========================================================================
// Model
// ===========================================================================

/// The filtered view as a list of visible elements plus a gap position.
struct Model<F> {
	data: Vec<i32>,
	visible: F,
	gap: usize,
	last: Option<(Direction, usize)>,
}

impl<F: Fn(i32) -> bool> Model<F> {
	fn new(data: Vec<i32>, visible: F) -> Self {
		Model {
			data,
			visible,
			gap: 0,
			last: None,
		}
	}

	fn visible_indices(&self) -> Vec<usize> {
		(0..self.data.len()).filter(|&i| (self.visible)(self.data[i])).collect()
	}

	fn projection(data: &[i32], visible: &F) -> Vec<i32> {
		data.iter().copied().filter(|&x| visible(x)).collect()
	}

	fn has_next(&self) -> bool {
		self.gap < self.visible_indices().len()
	}

	fn has_previous(&self) -> bool {
		self.gap > 0
	}

	fn next(&mut self) -> Option<i32> {
		let index = *self.visible_indices().get(self.gap)?;
		self.gap += 1;
		self.last = Some((Direction::Forward, index));
		Some(self.data[index])
	}

	fn previous(&mut self) -> Option<i32> {
		self.gap = self.gap.checked_sub(1)?;
		let index = self.visible_indices()[self.gap];
		self.last = Some((Direction::Reverse, index));
		Some(self.data[index])
	}

	fn remove(&mut self) -> bool {
		let Some((direction, index)) = self.last.take() else {
			return false;
		};
		self.data.remove(index);
		if direction == Direction::Forward {
			self.gap -= 1;
		}
		true
	}

	/// Replaces the last returned element. Only values in the view are legal.
	fn set(&mut self, value: i32) -> Result<(), &'static str> {
		let Some((_, index)) = self.last else {
			return Err("illegal state");
		};
		if !(self.visible)(value) {
			return Err("invalid argument");
		}
		self.data[index] = value;
		Ok(())
	}

	fn add(&mut self, value: i32) -> Result<(), &'static str> {
		if !(self.visible)(value) {
			return Err("invalid argument");
		}
		let at = match self.gap {
			0 => 0,
			gap => self.visible_indices()[gap - 1] + 1,
		};
		self.data.insert(at, value);
		self.gap += 1;
		self.last = None;
		Ok(())
	}
}

fn kind(error: &Error) -> &'static str {
	match error {
		Error::IllegalState(_) => "illegal state",
		Error::InvalidArgument(_) => "invalid argument",
		_ => "unexpected",
	}
}

// ===========================================================================
// Random Walk
// ===========================================================================

fn walk<C, F>(cursor: &mut C, model: &mut Model<F>, rng: &mut StdRng, steps: usize)
where
	C: BidiCursor<Item = i32>,
	F: Fn(i32) -> bool,
{
	for step in 0..steps {
		match rng.random_range(0..10) {
			0 | 1 => {
				assert_eq!(cursor.next().ok(), model.next(), "next() at step {}", step);
			}
			2 | 3 => {
				assert_eq!(cursor.previous().ok(), model.previous(), "previous() at step {}", step);
			}
			4 => {
				assert_eq!(cursor.has_next(), model.has_next(), "has_next() at step {}", step);
			}
			5 => {
				assert_eq!(
					cursor.has_previous(),
					model.has_previous(),
					"has_previous() at step {}",
					step
				);
			}
			6 => match cursor.remove() {
				Ok(()) => assert!(model.remove(), "remove() succeeded at step {}", step),
				Err(e) => {
					assert!(matches!(e, Error::IllegalState(_)), "remove() at step {}: {}", step, e);
					assert!(!model.remove(), "remove() failed at step {}", step);
				}
			},
			7 | 8 => {
				let value = rng.random_range(0..60);
				assert_eq!(
					cursor.set(value).map_err(|e| kind(&e)),
					model.set(value),
					"set({}) at step {}",
					value,
					step
				);
			}
			_ => {
				let value = rng.random_range(0..60);
				assert_eq!(
					cursor.add(value).map_err(|e| kind(&e)),
					model.add(value),
					"add({}) at step {}",
					value,
					step
				);
			}
		}
	}
}

fn check_final<F: Fn(i32) -> bool>(actual: &[i32], model: &Model<F>) {
	assert_eq!(
		Model::projection(actual, &model.visible),
		Model::projection(&model.data, &model.visible),
		"visible elements diverged"
	);

	let mut actual_sorted = actual.to_vec();
	actual_sorted.sort();
	let mut model_sorted = model.data.clone();
	model_sorted.sort();
	assert_eq!(actual_sorted, model_sorted, "element multisets diverged");
}

// ===========================================================================
// Tests
// ===========================================================================

#[test]
fn random_walk_single_filter() {
	for seed in 0..20u64 {
		let mut rng = StdRng::seed_from_u64(seed);
		let initial: Vec<i32> = (0..40).map(|_| rng.random_range(0..60)).collect();

		let mut data = initial.clone();
		let mut model = Model::new(initial, |x| x % 3 == 0);
		{
			let mut cursor = ListCursor::new(&mut data).filter(|x| x % 3 == 0);
			walk(&mut cursor, &mut model, &mut rng, 2_000);
		}
		check_final(&data, &model);
	}
}

#[test]
fn random_walk_nested_filters() {
	for seed in 100..120u64 {
		let mut rng = StdRng::seed_from_u64(seed);
		let initial: Vec<i32> = (0..40).map(|_| rng.random_range(0..60)).collect();

		let mut data = initial.clone();
		let mut model = Model::new(initial, |x| x % 6 == 0);
		{
			let evens = ListCursor::new(&mut data).filter(|x| x % 2 == 0);
			let mut cursor = evens.filter(|x| x % 3 == 0);
			walk(&mut cursor, &mut model, &mut rng, 2_000);
		}
		check_final(&data, &model);
	}
}

#[test]
fn random_walk_sparse_matches() {
	for seed in 200..210u64 {
		let mut rng = StdRng::seed_from_u64(seed);
		let initial: Vec<i32> = (0..60).map(|_| rng.random_range(0..60)).collect();

		let mut data = initial.clone();
		let mut model = Model::new(initial, |x| x % 17 == 0);
		{
			let mut cursor = ListCursor::new(&mut data).filter(|x| x % 17 == 0);
			walk(&mut cursor, &mut model, &mut rng, 1_000);
		}
		check_final(&data, &model);
	}
}
