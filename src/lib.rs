//! # Cursor Adapters: Filtering and Merging over Bidirectional Cursors
//!
//! This crate provides composable adapters over an abstract **cursor**: a
//! traversal handle that can move forward (and, for [`BidiCursor`]s,
//! backward) over an ordered sequence and mutate it in place.
//!
//! ## Design Overview
//!
//! Two adapters carry the interesting logic:
//!
//! - [`FilteringCursor`] exposes only the elements of a bidirectional source
//!   that satisfy a predicate. It keeps a single look-ahead *or* look-behind
//!   element cached, and crossing traversal direction steps the source over
//!   that cached element, so `next()` followed by `previous()` always returns
//!   the same element. `remove()`/`set()`/`add()` are delegated to the source.
//! - [`MergeCursor`] collates several sorted forward cursors into one sorted
//!   sequence. Ties are broken by source registration order, and `remove()`
//!   is delegated to whichever source produced the last element.
//!
//! Both are cursors themselves, so they nest freely:
//!
//! ```text
//!   ForwardFilteringCursor
//!            │
//!            ▼
//!       MergeCursor ──┬── FilteringCursor ── ListCursor (Vec)
//!                     └── SliceCursor
//! ```
//!
//! Each layer only tracks its own cache state and forwards `remove`/`set` one
//! layer down. There is no state shared between layers.
//!
//! ## Basic Usage
//!
//! ```
//! use cursor_adapters::{BidiCursor, Cursor, ListCursor, MergeCursor, SliceCursor};
//!
//! let mut numbers: Vec<i32> = (0..20).collect();
//! let fib = [1, 1, 2, 3, 5, 8, 13, 21];
//!
//! {
//!     let threes = ListCursor::new(&mut numbers).filter(|x| x % 3 == 0);
//!     let sources: Vec<Box<dyn Cursor<Item = i32> + '_>> =
//!         vec![Box::new(threes), Box::new(SliceCursor::new(&fib))];
//!     let mut merged = MergeCursor::natural(sources);
//!
//!     let head: Vec<i32> = merged.iter().take(6).collect();
//!     assert_eq!(head, vec![0, 1, 1, 2, 3, 3]);
//!
//!     // The second 3 came from the Fibonacci slice (index 1), the first from
//!     // the filtered list. Removing it is delegated to the slice, which is
//!     // read-only.
//!     assert_eq!(merged.last_source_index(), Ok(1));
//!     assert!(merged.remove().is_err());
//! }
//! ```
//!
//! ## Threading
//!
//! Cursors are single-threaded. An adapter assumes exclusive access to every
//! source it wraps for its whole lifetime; moving or mutating a source behind
//! an adapter's back leaves the adapter in an unspecified (but memory safe)
//! state.

pub mod cursor;
pub mod error;
pub mod filter;
pub mod list;
pub mod merge;

pub use cursor::{BidiCursor, Cursor, Direction, Iter, RevIter};
pub use error::{Error, Result};
pub use filter::{FilteringCursor, ForwardFilteringCursor};
pub use list::{ListCursor, SliceCursor};
pub use merge::{Comparator, MergeCursor, INLINE_SOURCES};
