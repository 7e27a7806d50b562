//! Data structures.
//!
//! # Organization
//!
//! - [`ordered`] - The ordered list, its cursor and iterator
//! - [`comparator`] - Key comparators
//! - [`internal`] - Node arena and atomic links (pub(crate))

pub mod comparator;
pub(crate) mod internal;
pub mod ordered;

pub use comparator::{Comparator, NaturalOrder, Reversed, ThreeWay};
pub use ordered::{Cursor, Iter, OrderedList};
