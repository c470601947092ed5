//! The generation-tagged [`NodeId`] arena handle.

use std::fmt;

/// Identifies a node slot in the editor's arena.
///
/// The `generation` tag makes staleness detectable in O(1): purging a node
/// bumps its slot's generation, so any `NodeId` minted before the purge no
/// longer resolves. Ids are cheap to copy and carry no ownership; the arena
/// owns every node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    /// Assemble an id from its slot index and generation.
    ///
    /// Only the arena mints meaningful ids; an id fabricated elsewhere will
    /// simply fail to resolve.
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index within the arena.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Generation of the slot when this id was minted.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}
