//! Cursors that expose only the elements of a source matching a predicate.
//!
//! [`FilteringCursor`] wraps a [`BidiCursor`] and keeps the complete
//! bidirectional contract, including `remove`, `set` and `add`.
//! [`ForwardFilteringCursor`] wraps any forward-only [`Cursor`], such as a
//! [`MergeCursor`](crate::MergeCursor).
//!
//! ## Cache Model
//!
//! Answering `has_next()` requires moving the source until a matching element
//! is found. That element is cached until `next()` hands it out. The
//! bidirectional cursor keeps at most one such element, tagged with the
//! direction it was found in:
//!
//! ```text
//!   source:     a   B   c   d   E   f          (upper case = matches)
//!
//!   after next() -> B, the source sits here:
//!                      ^
//!   has_next() scans c, d, E and caches E:
//!                                  ^           Pending::Forward(E)
//!   has_previous() must first step back over E, then scan d, c, B:
//!                  ^                           Pending::Reverse(B)
//! ```
//!
//! A cached element describes the physical position of the source relative to
//! the logical position of the cursor. Crossing direction steps over that one
//! element before scanning, which is what keeps `next()` followed by
//! `previous()` returning the same element.

use std::fmt;
use std::mem;

use tracing::trace;

use crate::cursor::{BidiCursor, Cursor, Direction};
use crate::error::{Error, Result};

/// A matching element found ahead of the logical position, not yet delivered.
#[derive(Debug, Default)]
enum Pending<T> {
	#[default]
	Empty,
	/// The source sits just past this element; it is what `next()` returns.
	Forward(T),
	/// The source sits just before this element; it is what `previous()` returns.
	Reverse(T),
}

/// Bookkeeping for the element most recently handed out.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
enum LastReturned {
	/// Nothing to `remove`/`set`.
	None,
	/// The source's own last returned element is the one we delivered.
	InPlace(Direction),
	/// The source has moved since we delivered the element.
	Displaced(Direction),
}

impl LastReturned {
	fn displace(&mut self) {
		if let LastReturned::InPlace(direction) = *self {
			*self = LastReturned::Displaced(direction);
		}
	}
}

// ---------------------------------------------------------------------------
// Bidirectional filtering
// ---------------------------------------------------------------------------

/// A bidirectional cursor over the elements of `source` that satisfy `predicate`.
///
/// The predicate must be pure and give the same answer for an element every
/// time it is asked. The cursor owns (or exclusively borrows) its source: any
/// other access to the source while the cursor is in use invalidates it.
///
/// `remove()` and `set()` are delegated to the source. They stay legal after
/// `has_next()`/`has_previous()`; the cursor walks the source back onto the
/// delivered element before delegating.
///
/// # Example
///
/// ```
/// use cursor_adapters::{BidiCursor, Cursor, FilteringCursor, SliceCursor};
///
/// let data: Vec<u32> = (0..20).collect();
/// let mut threes = FilteringCursor::new(SliceCursor::new(&data), |x: &u32| x % 3 == 0);
///
/// let forward: Vec<u32> = threes.iter().collect();
/// assert_eq!(forward, vec![0, 3, 6, 9, 12, 15, 18]);
///
/// let backward: Vec<u32> = threes.rev_iter().collect();
/// assert_eq!(backward, vec![18, 15, 12, 9, 6, 3, 0]);
/// assert!(!threes.has_previous());
/// ```
pub struct FilteringCursor<C: Cursor, P> {
	source: C,
	predicate: P,
	pending: Pending<C::Item>,
	last: LastReturned,
}

impl<C, P> FilteringCursor<C, P>
where
	C: BidiCursor,
	P: Fn(&C::Item) -> bool,
{
	/// Creates a filtering cursor at the current position of `source`.
	pub fn new(source: C, predicate: P) -> Self {
		FilteringCursor {
			source,
			predicate,
			pending: Pending::Empty,
			last: LastReturned::None,
		}
	}

	/// Caches the next matching element, returning `false` if there is none.
	fn fill_forward(&mut self) -> Result<bool> {
		match self.pending {
			Pending::Forward(_) => return Ok(true),
			Pending::Reverse(_) => {
				trace!("filtering cursor crossing from reverse to forward");
				self.last.displace();
				// The source sits before the element cached for previous();
				// that element is behind the logical position, so skip it.
				self.source.next()?;
				self.pending = Pending::Empty;
			}
			Pending::Empty => {}
		}

		while self.source.has_next() {
			self.last.displace();
			let item = self.source.next()?;
			if (self.predicate)(&item) {
				self.pending = Pending::Forward(item);
				return Ok(true);
			}
		}
		Ok(false)
	}

	/// Caches the previous matching element, returning `false` if there is none.
	fn fill_backward(&mut self) -> Result<bool> {
		match self.pending {
			Pending::Reverse(_) => return Ok(true),
			Pending::Forward(_) => {
				trace!("filtering cursor crossing from forward to reverse");
				self.last.displace();
				self.source.previous()?;
				self.pending = Pending::Empty;
			}
			Pending::Empty => {}
		}

		while self.source.has_previous() {
			self.last.displace();
			let item = self.source.previous()?;
			if (self.predicate)(&item) {
				self.pending = Pending::Reverse(item);
				return Ok(true);
			}
		}
		Ok(false)
	}

	/// Moves the source back onto the last delivered element, so that the
	/// source's own `remove()`/`set()` address it.
	fn restore_last(&mut self, call: &'static str) -> Result<()> {
		let direction = match self.last {
			LastReturned::None => return Err(Error::IllegalState(call)),
			LastReturned::InPlace(_) => return Ok(()),
			LastReturned::Displaced(direction) => direction,
		};

		trace!(?direction, "filtering cursor rewinding source onto last returned element");
		match direction {
			Direction::Forward => {
				// Scanning backwards finds the delivered element first; stepping
				// forward over it leaves it as the source's last returned element.
				self.fill_backward()?;
				match mem::take(&mut self.pending) {
					Pending::Reverse(_) => {
						self.source.next()?;
					}
					other => {
						self.pending = other;
						return Err(Error::IllegalState("source modified outside the cursor"));
					}
				}
			}
			Direction::Reverse => {
				self.fill_forward()?;
				match mem::take(&mut self.pending) {
					Pending::Forward(_) => {
						self.source.previous()?;
					}
					other => {
						self.pending = other;
						return Err(Error::IllegalState("source modified outside the cursor"));
					}
				}
			}
		}

		self.last = LastReturned::InPlace(direction);
		Ok(())
	}

	/// Drops any cached element, moving the source back to the logical position.
	fn settle(&mut self) -> Result<()> {
		match self.pending {
			Pending::Forward(_) => {
				self.source.previous()?;
			}
			Pending::Reverse(_) => {
				self.source.next()?;
			}
			Pending::Empty => return Ok(()),
		}
		self.pending = Pending::Empty;
		self.last.displace();
		Ok(())
	}

	/// Returns a shared reference to the source.
	pub fn get_ref(&self) -> &C {
		&self.source
	}

	/// Returns a mutable reference to the source.
	///
	/// Moving or mutating the source through this reference invalidates the
	/// filtering cursor.
	pub fn get_mut(&mut self) -> &mut C {
		&mut self.source
	}

	/// Consumes the filtering cursor, returning the source.
	///
	/// The source is left wherever the last scan stopped, which may be past
	/// the logical position of the filtering cursor.
	pub fn into_inner(self) -> C {
		self.source
	}
}

impl<C, P> Cursor for FilteringCursor<C, P>
where
	C: BidiCursor,
	P: Fn(&C::Item) -> bool,
{
	type Item = C::Item;

	fn has_next(&mut self) -> bool {
		matches!(self.fill_forward(), Ok(true))
	}

	fn next(&mut self) -> Result<C::Item> {
		self.fill_forward()?;
		match mem::take(&mut self.pending) {
			Pending::Forward(item) => {
				self.last = LastReturned::InPlace(Direction::Forward);
				Ok(item)
			}
			other => {
				self.pending = other;
				Err(Error::Exhausted)
			}
		}
	}

	fn remove(&mut self) -> Result<()> {
		self.restore_last("remove() without a preceding next() or previous()")?;
		self.source.remove()?;
		trace!("filtering cursor removed last returned element");
		self.last = LastReturned::None;
		Ok(())
	}
}

impl<C, P> BidiCursor for FilteringCursor<C, P>
where
	C: BidiCursor,
	P: Fn(&C::Item) -> bool,
{
	fn has_previous(&mut self) -> bool {
		matches!(self.fill_backward(), Ok(true))
	}

	fn previous(&mut self) -> Result<C::Item> {
		self.fill_backward()?;
		match mem::take(&mut self.pending) {
			Pending::Reverse(item) => {
				self.last = LastReturned::InPlace(Direction::Reverse);
				Ok(item)
			}
			other => {
				self.pending = other;
				Err(Error::Exhausted)
			}
		}
	}

	/// Replaces the last returned element in the source.
	///
	/// Fails with [`Error::InvalidArgument`] if `value` does not satisfy the
	/// predicate, without touching the source.
	fn set(&mut self, value: C::Item) -> Result<()> {
		self.restore_last("set() without a preceding next() or previous()")?;
		if !(self.predicate)(&value) {
			return Err(Error::InvalidArgument("set() value rejected by the filter predicate"));
		}
		self.source.set(value)
	}

	/// Inserts `value` into the source at the logical position.
	///
	/// Fails with [`Error::InvalidArgument`] if `value` does not satisfy the
	/// predicate, without touching the source.
	fn add(&mut self, value: C::Item) -> Result<()> {
		if !(self.predicate)(&value) {
			return Err(Error::InvalidArgument("add() value rejected by the filter predicate"));
		}
		self.settle()?;
		self.source.add(value)?;
		self.last = LastReturned::None;
		Ok(())
	}
}

impl<C, P> fmt::Debug for FilteringCursor<C, P>
where
	C: Cursor + fmt::Debug,
	C::Item: fmt::Debug,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FilteringCursor")
			.field("source", &self.source)
			.field("pending", &self.pending)
			.field("last", &self.last)
			.finish_non_exhaustive()
	}
}

// ---------------------------------------------------------------------------
// Forward-only filtering
// ---------------------------------------------------------------------------

/// A forward-only cursor over the elements of `source` that satisfy `predicate`.
///
/// Because a forward-only source cannot be rewound, `remove()` is only legal
/// while the source still sits on the delivered element, i.e. before any
/// `has_next()` call that had to scan ahead.
pub struct ForwardFilteringCursor<C: Cursor, P> {
	source: C,
	predicate: P,
	pending: Option<C::Item>,
	last: LastReturned,
}

impl<C, P> ForwardFilteringCursor<C, P>
where
	C: Cursor,
	P: Fn(&C::Item) -> bool,
{
	/// Creates a filtering cursor at the current position of `source`.
	pub fn new(source: C, predicate: P) -> Self {
		ForwardFilteringCursor {
			source,
			predicate,
			pending: None,
			last: LastReturned::None,
		}
	}

	fn fill(&mut self) -> Result<bool> {
		if self.pending.is_some() {
			return Ok(true);
		}
		while self.source.has_next() {
			self.last.displace();
			let item = self.source.next()?;
			if (self.predicate)(&item) {
				self.pending = Some(item);
				return Ok(true);
			}
		}
		Ok(false)
	}

	/// Returns a shared reference to the source.
	pub fn get_ref(&self) -> &C {
		&self.source
	}

	/// Returns a mutable reference to the source.
	///
	/// Moving or mutating the source through this reference invalidates the
	/// filtering cursor.
	pub fn get_mut(&mut self) -> &mut C {
		&mut self.source
	}

	/// Consumes the filtering cursor, returning the source.
	pub fn into_inner(self) -> C {
		self.source
	}
}

impl<C, P> Cursor for ForwardFilteringCursor<C, P>
where
	C: Cursor,
	P: Fn(&C::Item) -> bool,
{
	type Item = C::Item;

	fn has_next(&mut self) -> bool {
		matches!(self.fill(), Ok(true))
	}

	fn next(&mut self) -> Result<C::Item> {
		self.fill()?;
		let item = self.pending.take().ok_or(Error::Exhausted)?;
		self.last = LastReturned::InPlace(Direction::Forward);
		Ok(item)
	}

	fn remove(&mut self) -> Result<()> {
		match self.last {
			LastReturned::None => Err(Error::IllegalState("remove() without a preceding next()")),
			LastReturned::Displaced(_) => {
				Err(Error::IllegalState("remove() after has_next() advanced the source"))
			}
			LastReturned::InPlace(_) => {
				self.source.remove()?;
				self.last = LastReturned::None;
				Ok(())
			}
		}
	}
}

impl<C, P> fmt::Debug for ForwardFilteringCursor<C, P>
where
	C: Cursor + fmt::Debug,
	C::Item: fmt::Debug,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ForwardFilteringCursor")
			.field("source", &self.source)
			.field("pending", &self.pending)
			.field("last", &self.last)
			.finish_non_exhaustive()
	}
}
