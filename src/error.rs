//! # Error Types for Cursor Adapters
//!
//! Every cursor operation either succeeds completely or fails with one of
//! the variants below, leaving the wrapped sources unmutated.
//!
//! ## Error Taxonomy
//!
//! ```text
//! next()/previous() past an end ────────────► Exhausted
//! remove()/set() without a delivered element ► IllegalState
//! configuration after traversal began ──────► IllegalState / Unsupported
//! source cannot remove/set/add ─────────────► Unsupported (propagated verbatim)
//! value rejected by a filtered view ────────► InvalidArgument
//! merge compares with no comparator ────────► MissingComparator
//! ```
//!
//! None of these are transient. They signal a caller logic error and are
//! never retried internally.

use thiserror::Error;

/// Errors raised by cursors and cursor adapters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
	/// A traversal call moved past either end of the sequence.
	///
	/// Raised by `next()` when `has_next()` would return `false`, and by
	/// `previous()` when `has_previous()` would return `false`.
	#[error("no such element: the cursor is exhausted in this direction")]
	Exhausted,

	/// An operation was called at the wrong point in the cursor's lifecycle.
	///
	/// This error occurs when:
	/// - `remove()` or `set()` is called with no element delivered since the
	///   last `remove()`/`add()` (or ever)
	/// - `last_source_index()` is queried before any element was returned
	/// - a merge comparator is replaced after traversal started
	///
	/// The message names the call that was out of order.
	#[error("illegal state: {0}")]
	IllegalState(&'static str),

	/// The source does not support the requested operation.
	///
	/// Adapters forward this unchanged, so callers can tell "not supported by
	/// this source" apart from "called at the wrong time".
	#[error("unsupported operation: {0}")]
	Unsupported(&'static str),

	/// A value passed to `set()` or `add()` cannot live in the target view.
	///
	/// A filtering cursor rejects values that fail its predicate, so that a
	/// stack of filters never holds an element one of its layers cannot see.
	/// The source is left untouched.
	#[error("invalid argument: {0}")]
	InvalidArgument(&'static str),

	/// A merge cursor needed to compare elements of two sources but has no
	/// comparator configured.
	#[error("no comparator configured: call `set_comparator` (or `set_natural_order`) before traversing more than one source")]
	MissingComparator,
}

/// A Result type alias using our custom Error type.
pub type Result<T> = std::result::Result<T, Error>;
