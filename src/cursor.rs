//! The cursor contract shared by every source and adapter in this crate.
//!
//! A [`Cursor`] is a forward traversal handle that can optionally remove the
//! element it returned last. A [`BidiCursor`] adds backward traversal and
//! in-place replacement/insertion. Both traits are object safe, and both are
//! implemented for `&mut C` and `Box<C>`, so adapters can be layered over
//! borrowed, owned, or type-erased sources alike.
//!
//! ## Positions
//!
//! A cursor never points *at* an element. It sits in the gap between two
//! elements:
//!
//! ```text
//!      a     b     c
//!   ^     ^     ^     ^
//!   0     1     2     3      <- possible gap positions
//! ```
//!
//! `next()` returns the element after the gap and moves the gap forward,
//! `previous()` returns the element before the gap and moves it backward.
//! Either call makes the returned element the "last returned" element, which
//! is what `remove()` and `set()` act upon.

use crate::error::{Error, Result};
use crate::filter::{FilteringCursor, ForwardFilteringCursor};

/// The traversal direction that produced an element.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Direction {
	/// Produced by `next()`.
	Forward,
	/// Produced by `previous()`.
	Reverse,
}

impl Direction {
	/// Returns the other direction.
	pub fn opposite(self) -> Direction {
		match self {
			Direction::Forward => Direction::Reverse,
			Direction::Reverse => Direction::Forward,
		}
	}
}

/// A forward traversal handle over an ordered sequence.
///
/// # Contract
///
/// - `has_next()` returns `true` iff a subsequent `next()` would succeed. It
///   may move an underlying source (which is why it takes `&mut self`) but
///   must not change the logical position.
/// - `next()` fails with [`Error::Exhausted`] at the end of the sequence.
/// - `remove()` deletes the element returned by the last `next()`. Cursors
///   that cannot remove return [`Error::Unsupported`], which is the default.
///
/// A cursor assumes exclusive access to whatever it traverses. Mutating the
/// sequence by any other route while the cursor is alive is undefined
/// behaviour at the contract level.
pub trait Cursor {
	/// The element type produced by this cursor.
	type Item;

	/// Returns `true` if `next()` would return an element.
	fn has_next(&mut self) -> bool;

	/// Returns the element after the cursor and advances past it.
	fn next(&mut self) -> Result<Self::Item>;

	/// Removes the element returned by the most recent traversal call.
	fn remove(&mut self) -> Result<()> {
		Err(Error::Unsupported("remove"))
	}

	/// Borrows the cursor as a standard [`Iterator`] that ends at exhaustion.
	///
	/// # Example
	///
	/// ```
	/// use cursor_adapters::{Cursor, SliceCursor};
	///
	/// let data = [1, 2, 3];
	/// let mut cursor = SliceCursor::new(&data);
	/// let doubled: Vec<i32> = cursor.iter().map(|x| x * 2).collect();
	/// assert_eq!(doubled, vec![2, 4, 6]);
	/// assert!(!cursor.has_next());
	/// ```
	fn iter(&mut self) -> Iter<'_, Self>
	where
		Self: Sized,
	{
		Iter {
			cursor: self,
		}
	}

	/// Wraps this cursor so that it only yields elements matching `predicate`.
	///
	/// Use [`BidiCursor::filter`] instead when the source can move backwards:
	/// the bidirectional adapter can also `remove` after a look-ahead.
	fn filter_forward<P>(self, predicate: P) -> ForwardFilteringCursor<Self, P>
	where
		Self: Sized,
		P: Fn(&Self::Item) -> bool,
	{
		ForwardFilteringCursor::new(self, predicate)
	}
}

/// A cursor that can also move backwards and mutate in place.
///
/// # Contract
///
/// On top of [`Cursor`]:
///
/// - `previous()` fails with [`Error::Exhausted`] at the start.
/// - `next()` directly after `previous()` returns the same element, and the
///   other way around.
/// - `remove()` and `set()` act on the element returned by the most recent
///   `next()` or `previous()`, and fail with [`Error::IllegalState`] when no
///   such element exists (nothing returned yet, or `remove()`/`add()` called
///   since).
/// - `add()` inserts before the gap; a following `previous()` returns the
///   inserted element.
pub trait BidiCursor: Cursor {
	/// Returns `true` if `previous()` would return an element.
	fn has_previous(&mut self) -> bool;

	/// Returns the element before the cursor and moves back past it.
	fn previous(&mut self) -> Result<Self::Item>;

	/// Replaces the element returned by the most recent traversal call.
	fn set(&mut self, _value: Self::Item) -> Result<()> {
		Err(Error::Unsupported("set"))
	}

	/// Inserts an element at the cursor position.
	fn add(&mut self, _value: Self::Item) -> Result<()> {
		Err(Error::Unsupported("add"))
	}

	/// Borrows the cursor as an [`Iterator`] walking backwards to the start.
	fn rev_iter(&mut self) -> RevIter<'_, Self>
	where
		Self: Sized,
	{
		RevIter {
			cursor: self,
		}
	}

	/// Wraps this cursor so that it only exposes elements matching `predicate`,
	/// in both directions.
	///
	/// # Example
	///
	/// ```
	/// use cursor_adapters::{BidiCursor, Cursor, ListCursor};
	///
	/// let mut data: Vec<i32> = (0..10).collect();
	/// let mut evens = ListCursor::new(&mut data).filter(|x| x % 2 == 0);
	///
	/// assert_eq!(evens.next(), Ok(0));
	/// assert_eq!(evens.next(), Ok(2));
	/// assert_eq!(evens.previous(), Ok(2));
	/// evens.remove().unwrap();
	/// drop(evens);
	///
	/// assert_eq!(data, vec![0, 1, 3, 4, 5, 6, 7, 8, 9]);
	/// ```
	fn filter<P>(self, predicate: P) -> FilteringCursor<Self, P>
	where
		Self: Sized,
		P: Fn(&Self::Item) -> bool,
	{
		FilteringCursor::new(self, predicate)
	}
}

// ---------------------------------------------------------------------------
// Forwarding implementations
// ---------------------------------------------------------------------------

impl<C: Cursor + ?Sized> Cursor for &mut C {
	type Item = C::Item;

	#[inline]
	fn has_next(&mut self) -> bool {
		(**self).has_next()
	}

	#[inline]
	fn next(&mut self) -> Result<Self::Item> {
		(**self).next()
	}

	#[inline]
	fn remove(&mut self) -> Result<()> {
		(**self).remove()
	}
}

impl<C: BidiCursor + ?Sized> BidiCursor for &mut C {
	#[inline]
	fn has_previous(&mut self) -> bool {
		(**self).has_previous()
	}

	#[inline]
	fn previous(&mut self) -> Result<Self::Item> {
		(**self).previous()
	}

	#[inline]
	fn set(&mut self, value: Self::Item) -> Result<()> {
		(**self).set(value)
	}

	#[inline]
	fn add(&mut self, value: Self::Item) -> Result<()> {
		(**self).add(value)
	}
}

impl<C: Cursor + ?Sized> Cursor for Box<C> {
	type Item = C::Item;

	#[inline]
	fn has_next(&mut self) -> bool {
		(**self).has_next()
	}

	#[inline]
	fn next(&mut self) -> Result<Self::Item> {
		(**self).next()
	}

	#[inline]
	fn remove(&mut self) -> Result<()> {
		(**self).remove()
	}
}

impl<C: BidiCursor + ?Sized> BidiCursor for Box<C> {
	#[inline]
	fn has_previous(&mut self) -> bool {
		(**self).has_previous()
	}

	#[inline]
	fn previous(&mut self) -> Result<Self::Item> {
		(**self).previous()
	}

	#[inline]
	fn set(&mut self, value: Self::Item) -> Result<()> {
		(**self).set(value)
	}

	#[inline]
	fn add(&mut self, value: Self::Item) -> Result<()> {
		(**self).add(value)
	}
}

// ---------------------------------------------------------------------------
// Iterator bridges
// ---------------------------------------------------------------------------

/// Forward [`Iterator`] over a borrowed cursor. Created by [`Cursor::iter`].
#[derive(Debug)]
pub struct Iter<'a, C> {
	cursor: &'a mut C,
}

impl<C: Cursor> Iterator for Iter<'_, C> {
	type Item = C::Item;

	fn next(&mut self) -> Option<C::Item> {
		if self.cursor.has_next() {
			Cursor::next(&mut *self.cursor).ok()
		} else {
			None
		}
	}
}

/// Backward [`Iterator`] over a borrowed cursor. Created by [`BidiCursor::rev_iter`].
#[derive(Debug)]
pub struct RevIter<'a, C> {
	cursor: &'a mut C,
}

impl<C: BidiCursor> Iterator for RevIter<'_, C> {
	type Item = C::Item;

	fn next(&mut self) -> Option<C::Item> {
		if self.cursor.has_previous() {
			self.cursor.previous().ok()
		} else {
			None
		}
	}
}
