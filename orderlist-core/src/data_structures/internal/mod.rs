//! Internal implementation details.
//!
//! These are pub(crate) and not intended for external use.

pub mod link;
pub mod node_arena;

pub(crate) use link::NodeIndex;
pub(crate) use node_arena::NodeArena;
