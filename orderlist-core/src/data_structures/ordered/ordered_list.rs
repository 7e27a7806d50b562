use std::cmp::Ordering as KeyOrdering;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crossbeam::utils::CachePadded;

use super::cursor::Cursor;
use super::iter::Iter;
use crate::data_structures::Comparator;
use crate::data_structures::internal::{NodeArena, NodeIndex};
use crate::error::InsertError;

///
/// Ordered singly-linked list with single-writer / multi-reader publication.
///
// =============================================================================
// LIST STRUCTURE
// =============================================================================
//
// ┌──────┐    ┌──────┐    ┌──────┐    ┌──────┐
// │ HEAD │───►│  10  │───►│  20  │───►│  30  │───► NONE
// │(sent)│    │      │    │      │    │      │
// └──────┘    └──────┘    └──────┘    └──────┘
//
// Nodes live in a NodeArena and links are arena indices. HEAD is arena slot 0
// and never holds a key.
//
// INVARIANTS:
// 1. Keys reachable from HEAD are strictly increasing under the comparator
// 2. No duplicate keys
// 3. A node is never unlinked or freed before the list is dropped
// 4. At most one insert runs at a time (enforced by the writer claim)
//
// =============================================================================
// INSERT (publish-then-link)
// =============================================================================
//
// Before:   pred ──────────────────► curr
//
// Step 1 - push key into a fresh slot, point it at curr (Relaxed, unreachable):
//           pred ──────────────────► curr
//                        new ──────► curr
//
// Step 2 - publish (Release store into pred.next):
//           pred ──────► new ──────► curr
//
// A reader discovers `new` only through an Acquire load of pred.next, so it
// sees the key and new.next fully written. A reader that loaded pred.next
// before step 2 simply walks the old chain.
//
pub struct OrderedList<T, C> {
    arena: NodeArena<T>,
    comparator: C,
    writer: CachePadded<AtomicBool>,
    len: CachePadded<AtomicUsize>,
}

// Result of a forward scan: `curr` is the first node whose key is >= the probe
// (NONE when past the end), `pred` is the node linking to it (possibly HEAD).
#[derive(Debug, Copy, Clone)]
struct NodeLocation {
    pred: NodeIndex,
    curr: NodeIndex,
}

/// Exclusive right to mutate links, released on drop.
struct WriterClaim<'a>(&'a AtomicBool);

impl<'a> WriterClaim<'a> {
    fn try_acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| WriterClaim(flag))
    }
}

impl Drop for WriterClaim<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<T, C> OrderedList<T, C> {
    /// Successor of `node` (Acquire).
    #[inline]
    pub(crate) fn next_of(&self, node: NodeIndex) -> NodeIndex {
        self.arena.node(node).link().get_next()
    }

    /// Key stored at `node`.
    ///
    /// # Panics
    /// Panics on HEAD or NONE.
    #[inline]
    pub(crate) fn key_of(&self, node: NodeIndex) -> &T {
        assert!(!node.is_head(), "the sentinel head has no key");
        // SAFETY: indices other than HEAD are only obtained from links, and a
        // link is stored (Release) after the slot's key has been written.
        unsafe { self.arena.node(node).key() }
    }

    /// First node after HEAD, or NONE.
    #[inline]
    pub(crate) fn first_node(&self) -> NodeIndex {
        self.next_of(NodeIndex::HEAD)
    }

    /// Last node in the chain, or HEAD when the list is empty.
    pub(crate) fn find_last(&self) -> NodeIndex {
        let mut node = NodeIndex::HEAD;
        loop {
            let next = self.next_of(node);
            if next.is_none() {
                return node;
            }
            node = next;
        }
    }

    /// Number of keys whose insertion has been published.
    pub fn len(&self) -> usize {
        self.len.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.first_node().is_none()
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Smallest key, if any.
    pub fn first(&self) -> Option<&T> {
        let node = self.first_node();
        node.is_some().then(|| self.key_of(node))
    }

    /// Largest key, if any. Walks the whole list.
    pub fn last(&self) -> Option<&T> {
        let node = self.find_last();
        (!node.is_head()).then(|| self.key_of(node))
    }

    /// Iterates keys in ascending comparator order.
    pub fn iter(&self) -> Iter<'_, T, C> {
        Iter::new(self, self.first_node())
    }

    /// Cursor in the Exhausted state, the end marker for range traversal.
    pub fn cursor(&self) -> Cursor<'_, T, C> {
        Cursor::new(self, NodeIndex::NONE)
    }

    /// Cursor positioned at the smallest key (Exhausted if the list is empty).
    pub fn cursor_first(&self) -> Cursor<'_, T, C> {
        Cursor::new(self, self.first_node())
    }

    /// Collects all keys into a Vec.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<T, C> OrderedList<T, C>
where
    C: Comparator<T>,
{
    pub fn new(comparator: C) -> Self {
        OrderedList {
            arena: NodeArena::new(),
            comparator,
            writer: CachePadded::new(AtomicBool::new(false)),
            len: CachePadded::new(AtomicUsize::new(0)),
        }
    }

    #[inline]
    fn is_before(&self, node: NodeIndex, key: &T) -> bool {
        node.is_some() && self.comparator.compare(self.key_of(node), key) == KeyOrdering::Less
    }

    #[inline]
    fn is_match(&self, node: NodeIndex, key: &T) -> bool {
        node.is_some() && self.comparator.compare(self.key_of(node), key) == KeyOrdering::Equal
    }

    /// Single forward walk from HEAD, advancing while the next key sorts
    /// strictly before `key`.
    fn find_greater_or_equal(&self, key: &T) -> NodeLocation {
        let mut pred = NodeIndex::HEAD;
        loop {
            let curr = self.next_of(pred);
            if !self.is_before(curr, key) {
                return NodeLocation { pred, curr };
            }
            pred = curr;
        }
    }

    /// Last node whose key sorts strictly before `key`, or HEAD if none does.
    pub(crate) fn find_less_than(&self, key: &T) -> NodeIndex {
        let mut node = NodeIndex::HEAD;
        loop {
            let next = self.next_of(node);
            if !self.is_before(next, key) {
                return node;
            }
            node = next;
        }
    }

    /// First node whose key is >= `key`, or NONE.
    #[inline]
    pub(crate) fn seek_node(&self, key: &T) -> NodeIndex {
        self.find_greater_or_equal(key).curr
    }

    /// Inserts `key` keeping the list sorted.
    ///
    /// Safe to call while other threads read the list. Only one insert may run
    /// at a time; an insert that overlaps another returns
    /// [`InsertError::WriterBusy`] without touching the list.
    ///
    /// # Errors
    ///
    /// - [`InsertError::Duplicate`] if a key comparing equal is already stored.
    /// - [`InsertError::WriterBusy`] if another insert is in progress.
    ///
    /// # Example
    ///
    /// ```
    /// use orderlist_core::data_structures::{NaturalOrder, OrderedList};
    ///
    /// let list = OrderedList::new(NaturalOrder);
    /// assert!(list.insert(7).is_ok());
    /// assert!(list.insert(7).unwrap_err().is_duplicate());
    /// ```
    pub fn insert(&self, key: T) -> Result<(), InsertError<T>> {
        let Some(_claim) = WriterClaim::try_acquire(&self.writer) else {
            return Err(InsertError::WriterBusy(key));
        };

        let location = self.find_greater_or_equal(&key);
        if self.is_match(location.curr, &key) {
            return Err(InsertError::Duplicate(key));
        }

        // SAFETY: the writer claim makes this thread the only pusher.
        let node = unsafe { self.arena.push(key) };

        let pred_link = self.arena.node(location.pred).link();
        self.arena
            .node(node)
            .link()
            .set_next_relaxed(pred_link.get_next_relaxed());
        pred_link.set_next(node);

        self.len.fetch_add(1, Ordering::Release);
        Ok(())
    }

    /// Returns whether a key comparing equal to `key` is stored.
    pub fn contains(&self, key: &T) -> bool {
        self.is_match(self.seek_node(key), key)
    }

    /// Returns the stored key comparing equal to `key`.
    ///
    /// Useful when the comparator looks at only part of `T`.
    pub fn get(&self, key: &T) -> Option<&T> {
        let node = self.seek_node(key);
        self.is_match(node, key).then(|| self.key_of(node))
    }

    /// Iterates keys >= `key` in ascending order.
    pub fn iter_from(&self, key: &T) -> Iter<'_, T, C> {
        Iter::new(self, self.seek_node(key))
    }

    /// Cursor positioned at the first key >= `key` (Exhausted if none).
    pub fn cursor_at(&self, key: &T) -> Cursor<'_, T, C> {
        Cursor::new(self, self.seek_node(key))
    }
}

impl<T, C> Default for OrderedList<T, C>
where
    C: Comparator<T> + Default,
{
    fn default() -> Self {
        Self::new(C::default())
    }
}

impl<T: fmt::Debug, C> fmt::Debug for OrderedList<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T, C> IntoIterator for &'a OrderedList<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// Tests - Unique to OrderedList
// ============================================================================
// Note: Common tests are in tests/ordered_list_tests.rs
