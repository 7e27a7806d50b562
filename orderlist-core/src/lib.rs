//! An ordered, singly-linked list keyed by a user-supplied comparator.
//!
//! One thread may insert while any number of threads read. Links are loaded
//! with Acquire and published with Release, so a reader sees either the old
//! chain or a fully written new node.
//!
//! ```
//! use orderlist_core::{NaturalOrder, OrderedList};
//!
//! let list = OrderedList::new(NaturalOrder);
//! for key in [342u32, 413, 4552, 65, 512, 1, 31435] {
//!     list.insert(key).unwrap();
//! }
//!
//! let keys: Vec<u32> = list.iter().copied().collect();
//! assert_eq!(keys, [1, 65, 342, 413, 512, 4552, 31435]);
//!
//! assert!(list.contains(&512));
//! assert!(!list.contains(&999));
//! assert_eq!(list.cursor_at(&400).key(), Ok(&413));
//! ```

pub mod common_tests;
pub mod data_structures;
pub mod error;

// Re-export the public surface for convenience
pub use data_structures::{Comparator, Cursor, Iter, NaturalOrder, OrderedList, Reversed, ThreeWay};
pub use error::{CursorError, InsertError};
