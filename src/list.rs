//! Concrete cursors over contiguous storage.
//!
//! [`ListCursor`] borrows a `Vec` mutably and supports the full bidirectional
//! contract including `remove`, `set` and `add`. [`SliceCursor`] borrows a
//! slice and is read-only: its mutating calls return
//! [`Error::Unsupported`](crate::Error::Unsupported).
//!
//! Both hand out clones of the stored elements.

use crate::cursor::{BidiCursor, Cursor};
use crate::error::{Error, Result};

/// A bidirectional, mutating cursor over a `Vec<T>`.
///
/// The cursor keeps a gap position (`0..=len`) and the index of the element
/// returned by the most recent `next()`/`previous()`, if that element is
/// still addressable.
///
/// # Example
///
/// ```
/// use cursor_adapters::{BidiCursor, Cursor, ListCursor};
///
/// let mut data = vec!['a', 'b', 'c'];
/// let mut cursor = ListCursor::new(&mut data);
///
/// assert_eq!(cursor.next(), Ok('a'));
/// cursor.set('A').unwrap();
/// assert_eq!(cursor.next(), Ok('b'));
/// cursor.remove().unwrap();
/// cursor.add('x').unwrap();
/// drop(cursor);
///
/// assert_eq!(data, vec!['A', 'x', 'c']);
/// ```
#[derive(Debug)]
pub struct ListCursor<'a, T> {
	list: &'a mut Vec<T>,
	gap: usize,
	last: Option<usize>,
}

impl<'a, T> ListCursor<'a, T> {
	/// Creates a cursor positioned before the first element.
	pub fn new(list: &'a mut Vec<T>) -> Self {
		Self::at(list, 0)
	}

	/// Creates a cursor positioned before the element at `index`.
	///
	/// `ListCursor::at(list, list.len())` starts at the end, ready for
	/// backward traversal.
	///
	/// # Panics
	///
	/// Panics if `index > list.len()`.
	pub fn at(list: &'a mut Vec<T>, index: usize) -> Self {
		assert!(index <= list.len(), "cursor index {index} out of bounds for length {}", list.len());
		ListCursor {
			list,
			gap: index,
			last: None,
		}
	}

	fn last_returned(&self, call: &'static str) -> Result<usize> {
		self.last.ok_or(Error::IllegalState(call))
	}
}

impl<T: Clone> Cursor for ListCursor<'_, T> {
	type Item = T;

	fn has_next(&mut self) -> bool {
		self.gap < self.list.len()
	}

	fn next(&mut self) -> Result<T> {
		let item = self.list.get(self.gap).ok_or(Error::Exhausted)?.clone();
		self.last = Some(self.gap);
		self.gap += 1;
		Ok(item)
	}

	fn remove(&mut self) -> Result<()> {
		let index = self.last_returned("remove() without a preceding next() or previous()")?;
		self.list.remove(index);
		// After next() the gap sat past the removed element, after previous()
		// it sat before it. Either way it now sits where the element was.
		self.gap = index;
		self.last = None;
		Ok(())
	}
}

impl<T: Clone> BidiCursor for ListCursor<'_, T> {
	fn has_previous(&mut self) -> bool {
		self.gap > 0
	}

	fn previous(&mut self) -> Result<T> {
		let index = self.gap.checked_sub(1).ok_or(Error::Exhausted)?;
		let item = self.list[index].clone();
		self.gap = index;
		self.last = Some(index);
		Ok(item)
	}

	fn set(&mut self, value: T) -> Result<()> {
		let index = self.last_returned("set() without a preceding next() or previous()")?;
		self.list[index] = value;
		Ok(())
	}

	fn add(&mut self, value: T) -> Result<()> {
		self.list.insert(self.gap, value);
		self.gap += 1;
		self.last = None;
		Ok(())
	}
}

/// A bidirectional, read-only cursor over a slice.
#[derive(Debug, Clone)]
pub struct SliceCursor<'a, T> {
	slice: &'a [T],
	gap: usize,
}

impl<'a, T> SliceCursor<'a, T> {
	/// Creates a cursor positioned before the first element.
	pub fn new(slice: &'a [T]) -> Self {
		Self::at(slice, 0)
	}

	/// Creates a cursor positioned before the element at `index`.
	///
	/// # Panics
	///
	/// Panics if `index > slice.len()`.
	pub fn at(slice: &'a [T], index: usize) -> Self {
		assert!(index <= slice.len(), "cursor index {index} out of bounds for length {}", slice.len());
		SliceCursor {
			slice,
			gap: index,
		}
	}
}

impl<T: Clone> Cursor for SliceCursor<'_, T> {
	type Item = T;

	fn has_next(&mut self) -> bool {
		self.gap < self.slice.len()
	}

	fn next(&mut self) -> Result<T> {
		let item = self.slice.get(self.gap).ok_or(Error::Exhausted)?.clone();
		self.gap += 1;
		Ok(item)
	}
}

impl<T: Clone> BidiCursor for SliceCursor<'_, T> {
	fn has_previous(&mut self) -> bool {
		self.gap > 0
	}

	fn previous(&mut self) -> Result<T> {
		let index = self.gap.checked_sub(1).ok_or(Error::Exhausted)?;
		self.gap = index;
		Ok(self.slice[index].clone())
	}
}
