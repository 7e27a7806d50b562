//! Error types for ordered list operations.
//!
//! Both kinds describe a caller contract violation. They are reported as
//! values rather than assertions so the caller decides whether to recover,
//! propagate, or abort. Checks run in release builds as well.

use std::fmt;

/// Error returned by [`OrderedList::insert`](crate::data_structures::OrderedList::insert).
///
/// The rejected key is handed back in either case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertError<T> {
    /// A key comparing equal to this one is already stored.
    Duplicate(T),
    /// Another `insert` is running on the list at the same time.
    WriterBusy(T),
}

impl<T> InsertError<T> {
    /// Returns the key that was not inserted.
    pub fn into_inner(self) -> T {
        match self {
            Self::Duplicate(key) | Self::WriterBusy(key) => key,
        }
    }

    /// Returns `true` if this error is the `Duplicate` variant.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }

    /// Returns `true` if this error is the `WriterBusy` variant.
    pub fn is_writer_busy(&self) -> bool {
        matches!(self, Self::WriterBusy(_))
    }
}

impl<T: fmt::Debug> fmt::Display for InsertError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Duplicate(key) => write!(f, "key {:?} is already present", key),
            Self::WriterBusy(_) => write!(f, "another insert is in progress"),
        }
    }
}

impl<T: fmt::Debug> std::error::Error for InsertError<T> {}

/// Error returned when a cursor operation needs a current node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorError {
    /// The cursor is not positioned at a node.
    Exhausted,
}

impl fmt::Display for CursorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted => write!(f, "cursor is not positioned at a node"),
        }
    }
}

impl std::error::Error for CursorError {}
