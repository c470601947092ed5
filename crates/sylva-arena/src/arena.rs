//! The [`NodeArena`] slot store.

use sylva_core::{Node, NodeId};

use crate::error::ArenaError;

/// Lifecycle state of one arena slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SlotState {
    /// Vacant. The slot index is on the free list.
    Free,
    /// Occupied by a node that is part of the editor's live set.
    Live,
    /// Occupied by a logically deleted node kept reachable for undo.
    Recycled,
}

/// One storage slot. `generation` is bumped on purge so ids minted for a
/// previous occupant stop resolving.
#[derive(Debug)]
struct Slot {
    generation: u32,
    state: SlotState,
    node: Option<Node>,
}

/// Owning store for every node of one editor instance.
///
/// `insert` mints a [`NodeId`] tagged with the slot's current generation;
/// `recycle`/`restore` move a node between the live set and the recycle bin
/// without touching its data; `purge` destroys the node and bumps the slot
/// generation, making every outstanding id for it stale.
#[derive(Debug, Default)]
pub struct NodeArena {
    slots: Vec<Slot>,
    free_list: Vec<usize>,
    live_count: usize,
    recycled_count: usize,
}

impl NodeArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `node` in a fresh or reclaimed slot and return its id.
    pub fn insert(&mut self, node: Node) -> NodeId {
        match self.free_list.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                debug_assert_eq!(slot.state, SlotState::Free);
                slot.state = SlotState::Live;
                slot.node = Some(node);
                self.live_count += 1;
                NodeId::new(index as u32, slot.generation)
            }
            None => {
                let index = self.slots.len();
                self.slots.push(Slot {
                    generation: 0,
                    state: SlotState::Live,
                    node: Some(node),
                });
                self.live_count += 1;
                NodeId::new(index as u32, 0)
            }
        }
    }

    /// Resolve the slot for `id` only if the generation matches.
    fn slot(&self, id: NodeId) -> Option<&Slot> {
        self.slots
            .get(id.index() as usize)
            .filter(|s| s.generation == id.generation())
    }

    fn slot_mut(&mut self, id: NodeId) -> Option<&mut Slot> {
        self.slots
            .get_mut(id.index() as usize)
            .filter(|s| s.generation == id.generation())
    }

    /// Shared access to a live node. `None` for stale ids and recycled nodes.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slot(id)
            .filter(|s| s.state == SlotState::Live)
            .and_then(|s| s.node.as_ref())
    }

    /// Mutable access to a live node. `None` for stale ids and recycled nodes.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slot_mut(id)
            .filter(|s| s.state == SlotState::Live)
            .and_then(|s| s.node.as_mut())
    }

    /// Shared access to a recycled node.
    pub fn get_recycled(&self, id: NodeId) -> Option<&Node> {
        self.slot(id)
            .filter(|s| s.state == SlotState::Recycled)
            .and_then(|s| s.node.as_ref())
    }

    /// Mutable access to a recycled node.
    ///
    /// Undo-reachable structure parked in the bin still carries topology:
    /// commands that execute or unwind around it must see and edit the same
    /// parent/child links it was recycled with.
    pub fn get_recycled_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slot_mut(id)
            .filter(|s| s.state == SlotState::Recycled)
            .and_then(|s| s.node.as_mut())
    }

    /// Whether `id` resolves to a live node.
    pub fn is_live(&self, id: NodeId) -> bool {
        self.slot(id).is_some_and(|s| s.state == SlotState::Live)
    }

    /// Whether `id` resolves to a node in the recycle bin.
    pub fn is_recycled(&self, id: NodeId) -> bool {
        self.slot(id).is_some_and(|s| s.state == SlotState::Recycled)
    }

    /// Move a live node into the recycle bin.
    ///
    /// The node's data is untouched; it stops resolving through
    /// [`get`](Self::get) until [`restore`](Self::restore)d.
    pub fn recycle(&mut self, id: NodeId) -> Result<(), ArenaError> {
        let slot = self.slot_mut(id).ok_or(ArenaError::Stale { node: id })?;
        match slot.state {
            SlotState::Live => {
                slot.state = SlotState::Recycled;
                self.live_count -= 1;
                self.recycled_count += 1;
                Ok(())
            }
            SlotState::Recycled | SlotState::Free => Err(ArenaError::NotLive { node: id }),
        }
    }

    /// Return a recycled node to the live set.
    pub fn restore(&mut self, id: NodeId) -> Result<(), ArenaError> {
        let slot = self.slot_mut(id).ok_or(ArenaError::Stale { node: id })?;
        match slot.state {
            SlotState::Recycled => {
                slot.state = SlotState::Live;
                self.recycled_count -= 1;
                self.live_count += 1;
                Ok(())
            }
            SlotState::Live | SlotState::Free => Err(ArenaError::NotRecycled { node: id }),
        }
    }

    /// Permanently destroy a recycled node.
    ///
    /// The slot generation is bumped, so every id minted for the destroyed
    /// node becomes stale, and the slot is queued for reuse. Only nodes in
    /// the bin may be purged: the history drops commands — and thereby
    /// nodes — only once they are unreachable by undo.
    pub fn purge(&mut self, id: NodeId) -> Result<Node, ArenaError> {
        let index = id.index() as usize;
        let slot = self.slot_mut(id).ok_or(ArenaError::Stale { node: id })?;
        match slot.state {
            SlotState::Recycled => {
                let node = slot.node.take();
                slot.state = SlotState::Free;
                slot.generation += 1;
                self.recycled_count -= 1;
                self.free_list.push(index);
                // The occupied-Recycled invariant makes the take infallible.
                match node {
                    Some(node) => Ok(node),
                    None => unreachable!("recycled slot {index} had no node"),
                }
            }
            SlotState::Live | SlotState::Free => Err(ArenaError::NotRecycled { node: id }),
        }
    }

    /// Number of live nodes.
    pub fn live_count(&self) -> usize {
        self.live_count
    }

    /// Number of nodes in the recycle bin.
    pub fn recycled_count(&self) -> usize {
        self.recycled_count
    }

    /// Iterate over live nodes in slot order.
    pub fn iter_live(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            if slot.state == SlotState::Live {
                slot.node
                    .as_ref()
                    .map(|n| (NodeId::new(index as u32, slot.generation), n))
            } else {
                None
            }
        })
    }

    /// Iterate over recycled nodes in slot order.
    pub fn iter_recycled(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            if slot.state == SlotState::Recycled {
                slot.node
                    .as_ref()
                    .map(|n| (NodeId::new(index as u32, slot.generation), n))
            } else {
                None
            }
        })
    }
}
