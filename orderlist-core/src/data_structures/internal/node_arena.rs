use std::cell::UnsafeCell;
use std::fmt;
use std::marker::PhantomData;
use std::mem::MaybeUninit;
use std::ptr;
use std::sync::atomic::{AtomicPtr, AtomicUsize, Ordering};

use super::link::{Link, NodeIndex};

// =============================================================================
// SEGMENTED NODE ARENA
// =============================================================================
//
// Nodes live in segments whose sizes double: 32, 64, 128, ...
// A segment is never moved or freed before the arena is dropped, so a
// NodeIndex handed to a reader stays valid for the arena's whole lifetime.
//
//   segments[0] ──► [ HEAD | 1 | 2 | ... | 31 ]
//   segments[1] ──► [ 32 | 33 | ... | 95 ]
//   segments[2] ──► [ 96 | ... | 223 ]
//   segments[3] ──► null  (allocated on first push that needs it)
//
// Publication order used by the single writer:
//   1. store segment pointer      (Release, only when a segment is created)
//   2. write key + relaxed next   (slot not reachable yet)
//   3. predecessor.set_next(idx)  (Release, done by the list)
//
// A reader finds an index only through an Acquire load of some link, which
// synchronizes with step 3 and therefore also sees steps 1 and 2.
//
// Slot 0 is the sentinel head. Its key is never written nor dropped.
//
const FIRST_SEGMENT_SHIFT: u32 = 5;
const FIRST_SEGMENT_LEN: usize = 1 << FIRST_SEGMENT_SHIFT;
const SEGMENT_COUNT: usize = (usize::BITS - FIRST_SEGMENT_SHIFT) as usize;

#[inline]
fn segment_len(segment: usize) -> usize {
    FIRST_SEGMENT_LEN << segment
}

/// Maps a flat index to `(segment, offset)`.
#[inline]
fn locate(index: usize) -> (usize, usize) {
    let biased = index + FIRST_SEGMENT_LEN;
    let top_bit = usize::BITS - 1 - biased.leading_zeros();
    let segment = (top_bit - FIRST_SEGMENT_SHIFT) as usize;
    (segment, biased - (1 << top_bit))
}

pub(crate) struct Node<T> {
    key: UnsafeCell<MaybeUninit<T>>,
    next: Link,
}

impl<T> Node<T> {
    fn vacant() -> Self {
        Node {
            key: UnsafeCell::new(MaybeUninit::uninit()),
            next: Link::new(),
        }
    }

    #[inline]
    pub(crate) fn link(&self) -> &Link {
        &self.next
    }

    /// # Safety
    /// The node must have been filled by `NodeArena::push`, i.e. it is not the
    /// sentinel head and its index was obtained from a published link or from
    /// the writer's own `push`.
    #[inline]
    pub(crate) unsafe fn key(&self) -> &T {
        unsafe { (*self.key.get()).assume_init_ref() }
    }
}

/// Append-only node storage addressed by stable `NodeIndex` values.
pub(crate) struct NodeArena<T> {
    segments: [AtomicPtr<Node<T>>; SEGMENT_COUNT],
    /// Number of slots handed out, including the sentinel head.
    len: AtomicUsize,
    _marker: PhantomData<T>,
}

impl<T> NodeArena<T> {
    /// Creates an arena holding only the sentinel head at `NodeIndex::HEAD`.
    pub(crate) fn new() -> Self {
        let segments: [AtomicPtr<Node<T>>; SEGMENT_COUNT] =
            std::array::from_fn(|_| AtomicPtr::new(ptr::null_mut()));
        segments[0].store(Self::allocate_segment(0), Ordering::Relaxed);

        NodeArena {
            segments,
            len: AtomicUsize::new(1),
            _marker: PhantomData,
        }
    }

    fn allocate_segment(segment: usize) -> *mut Node<T> {
        let nodes: Box<[Node<T>]> = (0..segment_len(segment)).map(|_| Node::vacant()).collect();
        Box::into_raw(nodes) as *mut Node<T>
    }

    /// Returns the slot at `index`.
    ///
    /// # Panics
    /// Panics if `index` is `NONE` or points into a segment that was never
    /// allocated. Both mean a corrupted link.
    #[inline]
    pub(crate) fn node(&self, index: NodeIndex) -> &Node<T> {
        assert!(index.is_some(), "dereferenced NodeIndex::NONE");
        let (segment, offset) = locate(index.as_usize());
        let base = self.segments[segment].load(Ordering::Acquire);
        assert!(
            !base.is_null(),
            "{:?} points into unallocated segment {}",
            index,
            segment
        );
        // SAFETY: every slot of an allocated segment is initialized (vacant or
        // filled) and segments are never freed before the arena.
        unsafe { &*base.add(offset) }
    }

    /// Moves `key` into a fresh slot and returns its index.
    ///
    /// The slot's link is `NONE` and the slot is not reachable from any other
    /// link until the caller publishes it.
    ///
    /// # Safety
    /// At most one thread may call `push` at a time.
    pub(crate) unsafe fn push(&self, key: T) -> NodeIndex {
        let index = self.len.load(Ordering::Relaxed);
        let (segment, offset) = locate(index);

        let mut base = self.segments[segment].load(Ordering::Relaxed);
        if base.is_null() {
            base = Self::allocate_segment(segment);
            self.segments[segment].store(base, Ordering::Release);
        }

        // SAFETY: `index` has not been handed out yet, so no other reference to
        // this slot's key exists, and the caller guarantees a single pusher.
        unsafe {
            let node = &*base.add(offset);
            (*node.key.get()).write(key);
            node.next.set_next_relaxed(NodeIndex::NONE);
        }

        self.len.store(index + 1, Ordering::Release);
        NodeIndex::new(index)
    }

    /// Number of slots handed out, including the sentinel head.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len.load(Ordering::Acquire)
    }

    fn allocated_segments(&self) -> usize {
        self.segments
            .iter()
            .take_while(|segment| !segment.load(Ordering::Acquire).is_null())
            .count()
    }
}

impl<T> Drop for NodeArena<T> {
    fn drop(&mut self) {
        let len = *self.len.get_mut();

        // Drop filled keys. Slot 0 is the sentinel and holds no key.
        for index in 1..len {
            let (segment, offset) = locate(index);
            let base = *self.segments[segment].get_mut();
            unsafe { (*(*base.add(offset)).key.get()).assume_init_drop() };
        }

        // Segments are allocated in order, the first null ends the table.
        for (segment, slot) in self.segments.iter_mut().enumerate() {
            let base = *slot.get_mut();
            if base.is_null() {
                break;
            }
            unsafe {
                drop(Box::from_raw(ptr::slice_from_raw_parts_mut(
                    base,
                    segment_len(segment),
                )));
            }
        }
    }
}

impl<T> fmt::Debug for NodeArena<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeArena")
            .field("len", &self.len())
            .field("segments", &self.allocated_segments())
            .finish()
    }
}

// The writer moves keys in from whichever thread holds `&self`, readers share
// `&T` across threads.
unsafe impl<T: Send> Send for NodeArena<T> {}
unsafe impl<T: Send + Sync> Sync for NodeArena<T> {}
