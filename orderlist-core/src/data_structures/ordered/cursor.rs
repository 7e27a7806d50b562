//! Bidirectional cursor over an `OrderedList`.
//!
//! # State machine
//!
//! ```text
//!              seek / seek_to_first / seek_to_last
//!          ┌─────────────────────────────────────────┐
//!          ▼                                         │
//!   ┌────────────┐   move_next past last     ┌───────────┐
//!   │ Positioned │ ─────────────────────────►│ Exhausted │
//!   │  (node)    │   move_prev from first    │  (NONE)   │
//!   └────────────┘ ─────────────────────────►└───────────┘
//!          │ ▲
//!          └─┘ move_next / move_prev
//! ```
//!
//! `key`, `move_next` and `move_prev` on an Exhausted cursor return
//! [`CursorError::Exhausted`]. Only the `seek*` family leaves Exhausted.

use std::fmt;
use std::ptr;

use super::iter::Iter;
use super::ordered_list::OrderedList;
use crate::data_structures::Comparator;
use crate::data_structures::internal::NodeIndex;
use crate::error::CursorError;

/// A read-only position in an `OrderedList`.
///
/// The cursor borrows the list, so it can never outlive the nodes it points
/// at. Moving forward is O(1); moving backward rescans from the head and is
/// O(n) because nodes have no back links.
pub struct Cursor<'a, T, C> {
    list: &'a OrderedList<T, C>,
    node: NodeIndex,
}

impl<'a, T, C> Cursor<'a, T, C> {
    pub(crate) fn new(list: &'a OrderedList<T, C>, node: NodeIndex) -> Self {
        debug_assert!(!node.is_head());
        Cursor { list, node }
    }

    /// Returns `true` when positioned at a node.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.node.is_some()
    }

    /// Key at the current position.
    ///
    /// The reference is tied to the list, not to the cursor, so it stays
    /// usable after the cursor moves.
    pub fn key(&self) -> Result<&'a T, CursorError> {
        if !self.is_valid() {
            return Err(CursorError::Exhausted);
        }
        Ok(self.list.key_of(self.node))
    }

    /// Advances to the successor; becomes Exhausted after the last key.
    pub fn move_next(&mut self) -> Result<(), CursorError> {
        if !self.is_valid() {
            return Err(CursorError::Exhausted);
        }
        self.node = self.list.next_of(self.node);
        Ok(())
    }

    /// Positions at the smallest key (Exhausted if the list is empty).
    pub fn seek_to_first(&mut self) {
        self.node = self.list.first_node();
    }

    /// Positions at the largest key (Exhausted if the list is empty).
    pub fn seek_to_last(&mut self) {
        let last = self.list.find_last();
        self.node = if last.is_head() { NodeIndex::NONE } else { last };
    }

    /// Iterates from the current position to the end of the list.
    ///
    /// Yields nothing when the cursor is Exhausted.
    pub fn iter(&self) -> Iter<'a, T, C> {
        Iter::new(self.list, self.node)
    }
}

impl<'a, T, C> Cursor<'a, T, C>
where
    C: Comparator<T>,
{
    /// Moves to the predecessor by rescanning from the head.
    ///
    /// Becomes Exhausted when the cursor was at the first key.
    pub fn move_prev(&mut self) -> Result<(), CursorError> {
        let key = self.key()?;
        let pred = self.list.find_less_than(key);
        self.node = if pred.is_head() { NodeIndex::NONE } else { pred };
        Ok(())
    }

    /// Positions at the first key >= `target` (Exhausted if there is none).
    pub fn seek(&mut self, target: &T) {
        self.node = self.list.seek_node(target);
    }
}

// Manual impls to avoid requiring T: Clone/Copy
impl<T, C> Copy for Cursor<'_, T, C> {}

impl<T, C> Clone for Cursor<'_, T, C> {
    fn clone(&self) -> Self {
        *self
    }
}

/// Two cursors are equal when they belong to the same list and sit at the
/// same position. All Exhausted cursors of one list are equal.
impl<T, C> PartialEq for Cursor<'_, T, C> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.list, other.list) && self.node == other.node
    }
}

impl<T, C> Eq for Cursor<'_, T, C> {}

impl<'a, T, C> IntoIterator for Cursor<'a, T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug, C> fmt::Debug for Cursor<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("key", &self.key().ok())
            .finish()
    }
}
