//! Forward iterator over an `OrderedList`.

use std::fmt;
use std::iter::FusedIterator;

use super::ordered_list::OrderedList;
use crate::data_structures::internal::NodeIndex;

/// Iterator over keys in ascending order, starting at some node.
///
/// Links are followed with Acquire loads, so keys inserted concurrently ahead
/// of the iterator's position may or may not be yielded, and keys behind it
/// are never revisited.
pub struct Iter<'a, T, C> {
    list: &'a OrderedList<T, C>,
    node: NodeIndex,
}

impl<'a, T, C> Iter<'a, T, C> {
    pub(crate) fn new(list: &'a OrderedList<T, C>, node: NodeIndex) -> Self {
        Iter { list, node }
    }
}

impl<'a, T, C> Iterator for Iter<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.node.is_none() {
            return None;
        }

        let key = self.list.key_of(self.node);
        self.node = self.list.next_of(self.node);
        Some(key)
    }
}

impl<T, C> FusedIterator for Iter<'_, T, C> {}

// Manual impl to avoid requiring T: Clone / C: Clone
impl<T, C> Clone for Iter<'_, T, C> {
    fn clone(&self) -> Self {
        Iter {
            list: self.list,
            node: self.node,
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for Iter<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
