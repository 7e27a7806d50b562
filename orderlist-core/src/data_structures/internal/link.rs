use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Stable position of a node inside a `NodeArena`.
///
/// Uses a reserved sentinel value (`usize::MAX`) instead of `Option<NodeIndex>`
/// so a link fits in a single `AtomicUsize`.
///
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// The sentinel head slot. It never holds a key.
    pub const HEAD: NodeIndex = NodeIndex(0);

    /// "No node": end of the chain, or an exhausted cursor.
    pub const NONE: NodeIndex = NodeIndex(usize::MAX);

    #[inline]
    pub(crate) fn new(index: usize) -> Self {
        debug_assert_ne!(index, usize::MAX, "usize::MAX is reserved as NONE");
        NodeIndex(index)
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    #[inline]
    pub fn is_some(self) -> bool {
        !self.is_none()
    }

    #[inline]
    pub fn is_head(self) -> bool {
        self == Self::HEAD
    }

    #[inline]
    pub(crate) fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Debug for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NONE => f.write_str("NodeIndex(NONE)"),
            Self::HEAD => f.write_str("NodeIndex(HEAD)"),
            NodeIndex(index) => write!(f, "NodeIndex({})", index),
        }
    }
}

/// Atomic successor link of a node.
///
/// Readers always go through `get_next` (Acquire). The writer publishes a new
/// successor with `set_next` (Release) after every field of that successor has
/// been written. The relaxed variants are only valid where no reader can
/// observe the link yet, or where the caller is the writer reading its own
/// stores.
///
pub(crate) struct Link(AtomicUsize);

impl Link {
    pub(crate) fn new() -> Self {
        Link(AtomicUsize::new(NodeIndex::NONE.0))
    }

    /// Load next index (Acquire ordering)
    #[inline]
    pub(crate) fn get_next(&self) -> NodeIndex {
        NodeIndex(self.0.load(Ordering::Acquire))
    }

    /// Load next index (Relaxed ordering)
    #[inline]
    pub(crate) fn get_next_relaxed(&self) -> NodeIndex {
        NodeIndex(self.0.load(Ordering::Relaxed))
    }

    /// Store next index (Release ordering)
    #[inline]
    pub(crate) fn set_next(&self, next: NodeIndex) {
        self.0.store(next.0, Ordering::Release)
    }

    /// Store next index (Relaxed ordering)
    #[inline]
    pub(crate) fn set_next_relaxed(&self, next: NodeIndex) {
        self.0.store(next.0, Ordering::Relaxed)
    }
}

impl fmt::Debug for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Link").field(&self.get_next()).finish()
    }
}
