//! Comparator-ordered list and its traversal handles.
//!
//! - [`OrderedList`] - the list itself (single writer, many readers)
//! - [`Cursor`] - bidirectional position with seek
//! - [`Iter`] - forward `Iterator` over keys

pub mod cursor;
pub mod iter;
pub mod ordered_list;

pub use cursor::Cursor;
pub use iter::Iter;
pub use ordered_list::OrderedList;
