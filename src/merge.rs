//! K-way merge of sorted cursors.
//!
//! [`MergeCursor`] collates several forward cursors, each already sorted by
//! a shared comparator, into one sorted sequence. It keeps a one-element
//! look-ahead slot per source and on every `next()` picks the smallest
//! looked-ahead element:
//!
//! ```text
//!   source 0:  [1] 4 9          slots: 0 -> 1   (smallest, returned next)
//!   source 1:  [2] 3            slots: 1 -> 2
//!   source 2:  [1] 5            slots: 2 -> 1   (ties lose to lower index)
//! ```
//!
//! Equal elements are returned in source registration order, and each source
//! is advanced exactly once per element it contributes. The number of sources
//! is expected to be small, so the minimum is found with a linear scan.
//!
//! ## Lifecycle
//!
//! ```text
//!   configuring ── has_next()/next() ──► traversing
//!   (add_source, set_comparator)         (configuration frozen)
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use smallvec::SmallVec;
use tracing::trace;

use crate::cursor::Cursor;
use crate::error::{Error, Result};

/// Number of sources stored inline before the slot storage spills to the heap.
pub const INLINE_SOURCES: usize = 4;

/// A user supplied ordering over merge elements.
pub type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering>;

enum Order<T> {
	Unset,
	Natural(fn(&T, &T) -> Ordering),
	Custom(Comparator<T>),
}

impl<T> Order<T> {
	fn compare(&self, a: &T, b: &T) -> Result<Ordering> {
		match self {
			Order::Unset => Err(Error::MissingComparator),
			Order::Natural(cmp) => Ok(cmp(a, b)),
			Order::Custom(cmp) => Ok(cmp(a, b)),
		}
	}
}

/// Look-ahead state of one source.
#[derive(Debug)]
enum Slot<T> {
	/// Nothing fetched yet.
	Empty,
	/// Fetched and waiting to be merged.
	Peeked(T),
	/// The source reported no more elements; it is never asked again.
	Exhausted,
}

struct Source<C: Cursor> {
	cursor: C,
	slot: Slot<C::Item>,
}

impl<C: Cursor> Source<C> {
	fn new(cursor: C) -> Self {
		Source {
			cursor,
			slot: Slot::Empty,
		}
	}

	/// Fetches into an empty slot, marking the source exhausted if it has run dry.
	fn fill(&mut self, index: usize) -> Result<()> {
		if let Slot::Empty = self.slot {
			if self.cursor.has_next() {
				self.slot = Slot::Peeked(self.cursor.next()?);
			} else {
				trace!(source = index, "merge source exhausted");
				self.slot = Slot::Exhausted;
			}
		}
		Ok(())
	}
}

/// A cursor yielding the sorted merge of several sorted cursors.
///
/// # Example
///
/// ```
/// use cursor_adapters::{Cursor, MergeCursor, SliceCursor};
///
/// let evens = [0, 2, 4];
/// let odds = [1, 3, 5];
/// let mut merged = MergeCursor::natural([SliceCursor::new(&evens), SliceCursor::new(&odds)]);
///
/// assert_eq!(merged.next(), Ok(0));
/// assert_eq!(merged.last_source_index(), Ok(0));
/// assert_eq!(merged.next(), Ok(1));
/// assert_eq!(merged.last_source_index(), Ok(1));
/// assert_eq!(merged.iter().collect::<Vec<_>>(), vec![2, 3, 4, 5]);
/// ```
pub struct MergeCursor<C: Cursor> {
	sources: SmallVec<[Source<C>; INLINE_SOURCES]>,
	order: Order<C::Item>,
	started: bool,
	last_source: Option<usize>,
}

impl<C: Cursor> MergeCursor<C> {
	/// Creates a merge with no comparator configured.
	///
	/// Merging a single source works as is; merging more requires a call to
	/// [`set_comparator`](Self::set_comparator) or
	/// [`set_natural_order`](Self::set_natural_order) before traversal.
	pub fn new<I>(sources: I) -> Self
	where
		I: IntoIterator<Item = C>,
	{
		MergeCursor {
			sources: sources.into_iter().map(Source::new).collect(),
			order: Order::Unset,
			started: false,
			last_source: None,
		}
	}

	/// Creates a merge ordered by `comparator`.
	pub fn with_comparator<I, F>(sources: I, comparator: F) -> Self
	where
		I: IntoIterator<Item = C>,
		F: Fn(&C::Item, &C::Item) -> Ordering + 'static,
	{
		let mut merge = Self::new(sources);
		merge.order = Order::Custom(Box::new(comparator));
		merge
	}

	/// Creates a merge ordered by the natural ordering of the elements.
	pub fn natural<I>(sources: I) -> Self
	where
		I: IntoIterator<Item = C>,
		C::Item: Ord,
	{
		let mut merge = Self::new(sources);
		merge.order = Order::Natural(Ord::cmp);
		merge
	}

	fn ensure_configurable(&self, call: &'static str) -> Result<()> {
		if self.started {
			Err(Error::IllegalState(call))
		} else {
			Ok(())
		}
	}

	/// Appends a source. Sources added later lose ties against earlier ones.
	///
	/// Fails with [`Error::Unsupported`] once traversal has started.
	pub fn add_source(&mut self, cursor: C) -> Result<()> {
		if self.started {
			return Err(Error::Unsupported("add_source() after traversal started"));
		}
		self.sources.push(Source::new(cursor));
		Ok(())
	}

	/// Sets the comparator used to order elements across sources.
	///
	/// Fails with [`Error::IllegalState`] once traversal has started.
	pub fn set_comparator<F>(&mut self, comparator: F) -> Result<()>
	where
		F: Fn(&C::Item, &C::Item) -> Ordering + 'static,
	{
		self.ensure_configurable("set_comparator() after traversal started")?;
		self.order = Order::Custom(Box::new(comparator));
		Ok(())
	}

	/// Orders elements by their natural ordering.
	///
	/// Fails with [`Error::IllegalState`] once traversal has started.
	pub fn set_natural_order(&mut self) -> Result<()>
	where
		C::Item: Ord,
	{
		self.ensure_configurable("set_natural_order() after traversal started")?;
		self.order = Order::Natural(Ord::cmp);
		Ok(())
	}

	/// Returns `true` if a comparator (custom or natural) is configured.
	pub fn has_comparator(&self) -> bool {
		!matches!(self.order, Order::Unset)
	}

	/// Returns `true` once `has_next()` or `next()` has been called.
	pub fn is_started(&self) -> bool {
		self.started
	}

	/// Returns the index of the source that produced the last returned element.
	pub fn last_source_index(&self) -> Result<usize> {
		self.last_source
			.ok_or(Error::IllegalState("last_source_index() before any element was returned"))
	}

	/// Returns the number of sources.
	pub fn source_count(&self) -> usize {
		self.sources.len()
	}

	/// Returns the sources in registration order.
	pub fn sources(&self) -> impl Iterator<Item = &C> + '_ {
		self.sources.iter().map(|source| &source.cursor)
	}

	/// Consumes the merge, returning the sources in registration order.
	///
	/// Elements already fetched into look-ahead slots are dropped.
	pub fn into_sources(self) -> Vec<C> {
		self.sources.into_iter().map(|source| source.cursor).collect()
	}

	fn start(&mut self) {
		if !self.started {
			trace!(sources = self.sources.len(), "merge started");
			self.started = true;
		}
	}

	/// Index of the source holding the smallest looked-ahead element.
	fn least(&self) -> Result<Option<usize>> {
		let mut least: Option<(usize, &C::Item)> = None;
		for (index, source) in self.sources.iter().enumerate() {
			let Slot::Peeked(value) = &source.slot else {
				continue;
			};
			let replace = match least {
				None => true,
				// Only a strictly smaller element wins, so ties keep the lower index.
				Some((_, best)) => self.order.compare(value, best)? == Ordering::Less,
			};
			if replace {
				least = Some((index, value));
			}
		}
		Ok(least.map(|(index, _)| index))
	}
}

impl<C: Cursor> Cursor for MergeCursor<C> {
	type Item = C::Item;

	/// Returns `true` if any source has a looked-ahead element or can produce one.
	///
	/// Sources are only asked, never advanced, so `remove()` stays legal.
	fn has_next(&mut self) -> bool {
		self.start();
		self.sources.iter_mut().enumerate().any(|(index, source)| match source.slot {
			Slot::Peeked(_) => true,
			Slot::Exhausted => false,
			Slot::Empty => {
				if source.cursor.has_next() {
					true
				} else {
					trace!(source = index, "merge source exhausted");
					source.slot = Slot::Exhausted;
					false
				}
			}
		})
	}

	fn next(&mut self) -> Result<C::Item> {
		self.start();
		for (index, source) in self.sources.iter_mut().enumerate() {
			source.fill(index)?;
		}

		let index = self.least()?.ok_or(Error::Exhausted)?;
		match mem::replace(&mut self.sources[index].slot, Slot::Empty) {
			Slot::Peeked(value) => {
				self.last_source = Some(index);
				Ok(value)
			}
			other => {
				self.sources[index].slot = other;
				Err(Error::Exhausted)
			}
		}
	}

	/// Removes the last returned element from the source that produced it.
	fn remove(&mut self) -> Result<()> {
		let index = self.last_source.ok_or(Error::IllegalState("remove() before next()"))?;
		trace!(source = index, "merge delegating remove");
		self.sources[index].cursor.remove()
	}
}

impl<C> fmt::Debug for Source<C>
where
	C: Cursor + fmt::Debug,
	C::Item: fmt::Debug,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Source").field("cursor", &self.cursor).field("slot", &self.slot).finish()
	}
}

impl<C> fmt::Debug for MergeCursor<C>
where
	C: Cursor + fmt::Debug,
	C::Item: fmt::Debug,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MergeCursor")
			.field("sources", &self.sources)
			.field("has_comparator", &self.has_comparator())
			.field("started", &self.started)
			.field("last_source", &self.last_source)
			.finish()
	}
}
