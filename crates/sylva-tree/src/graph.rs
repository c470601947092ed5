//! Topology mutation and queries over the node arena.
//!
//! These functions are the only code that edits parent/child links. They
//! keep two invariants: the edge set is a forest (no node is its own
//! ancestor), and `parent(c) = p` iff `c ∈ children(p)`. Child-count
//! ranges are *not* enforced here — the editor tolerates over/underfilled
//! composites while a tree is being assembled and surfaces the condition
//! through [`check_setup_validity`].
//!
//! Nodes parked in the recycle bin keep their topology: a delete detaches a
//! node from its parent but leaves its own children in place, so undo can
//! re-attach the identical structure. Mutators therefore resolve binned
//! nodes as well as live ones.

use sylva_arena::NodeArena;
use sylva_core::{Node, NodeId, Point2, TreeError};

/// Resolve a node whether it is live or in the recycle bin.
fn node(arena: &NodeArena, id: NodeId) -> Option<&Node> {
    arena.get(id).or_else(|| arena.get_recycled(id))
}

/// Mutably resolve a node whether it is live or in the recycle bin.
fn node_mut(arena: &mut NodeArena, id: NodeId) -> Option<&mut Node> {
    if arena.is_live(id) {
        arena.get_mut(id)
    } else {
        arena.get_recycled_mut(id)
    }
}

/// Whether `ancestor` is reachable from `descendant` along parent links.
///
/// A node is not its own ancestor.
pub fn is_ancestor(arena: &NodeArena, ancestor: NodeId, descendant: NodeId) -> bool {
    let mut current = node(arena, descendant).and_then(|n| n.parent);
    while let Some(id) = current {
        if id == ancestor {
            return true;
        }
        current = node(arena, id).and_then(|n| n.parent);
    }
    false
}

/// Append `child` to `parent`'s children and set the back-reference.
///
/// Fails with [`TreeError::CycleWouldForm`] if `parent == child` or `parent`
/// is a descendant of `child`, and with [`TreeError::AlreadyChild`] on a
/// duplicate connection. The child-count range is deliberately not checked.
///
/// # Panics
///
/// Panics if `child` is already attached under a *different* parent; the
/// caller must detach first.
pub fn add_child(arena: &mut NodeArena, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
    if node(arena, parent).is_none() {
        return Err(TreeError::NotLive { node: parent });
    }
    if node(arena, child).is_none() {
        return Err(TreeError::NotLive { node: child });
    }
    if parent == child || is_ancestor(arena, child, parent) {
        return Err(TreeError::CycleWouldForm { parent, child });
    }
    let parent_node = match node(arena, parent) {
        Some(n) => n,
        None => return Err(TreeError::NotLive { node: parent }),
    };
    if parent_node.is_child(child) {
        return Err(TreeError::AlreadyChild { parent, child });
    }

    let child_node = match node_mut(arena, child) {
        Some(n) => n,
        None => return Err(TreeError::NotLive { node: child }),
    };
    match child_node.parent {
        None => child_node.parent = Some(parent),
        Some(other) => panic!("node {child} is still attached under {other}"),
    }
    match node_mut(arena, parent) {
        Some(n) => n.children.push(child),
        None => unreachable!("parent {parent} resolved above"),
    }
    Ok(())
}

/// Like [`add_child`], but insert `child` at `index` among `parent`'s
/// children (clamped to the end).
///
/// Commands restoring a deletion use this to put a child back at the slot
/// it was detached from, so sibling order — which is traversal order —
/// round-trips exactly.
pub fn insert_child(
    arena: &mut NodeArena,
    parent: NodeId,
    child: NodeId,
    index: usize,
) -> Result<(), TreeError> {
    add_child(arena, parent, child)?;
    if let Some(parent_node) = node_mut(arena, parent) {
        let appended = parent_node.children.len() - 1;
        let slot = index.min(appended);
        if slot != appended {
            let id = parent_node.children.remove(appended);
            parent_node.children.insert(slot, id);
        }
    }
    Ok(())
}

/// Overwrite `parent`'s child order with a previously captured snapshot.
///
/// `order` must be a permutation of the current children; commands use this
/// to undo a reorder exactly, position ties included.
///
/// # Panics
///
/// Panics if `order` is not a permutation of the current child set.
pub fn restore_child_order(arena: &mut NodeArena, parent: NodeId, order: &[NodeId]) {
    let Some(parent_node) = node_mut(arena, parent) else {
        return;
    };
    assert_eq!(
        parent_node.children.len(),
        order.len(),
        "child-order snapshot for {parent} does not match its children"
    );
    assert!(
        order.iter().all(|id| parent_node.children.contains(id)),
        "child-order snapshot for {parent} names a non-child"
    );
    parent_node.children.clear();
    parent_node.children.extend(order.iter().copied());
}

/// Detach `child` from `parent`.
///
/// Clears the back-reference, and drops the parent's flow indicator if it
/// pointed at the detached child. Returns `None` when `child` is not among
/// `parent`'s children.
pub fn remove_child(arena: &mut NodeArena, parent: NodeId, child: NodeId) -> Option<NodeId> {
    let parent_node = node_mut(arena, parent)?;
    let index = parent_node.children.iter().position(|&c| c == child)?;
    parent_node.children.remove(index);
    if parent_node.last_ticked_child == Some(child) {
        parent_node.last_ticked_child = None;
    }
    if let Some(child_node) = node_mut(arena, child) {
        child_node.parent = None;
    }
    Some(child)
}

/// Move `node_id` to `new_position`, re-sorting its siblings.
///
/// Traversal order equals visual left-to-right order, so a horizontal move
/// re-sorts the parent's children.
pub fn move_node(arena: &mut NodeArena, node_id: NodeId, new_position: Point2) {
    let parent = match node_mut(arena, node_id) {
        Some(n) => {
            n.position = new_position;
            n.parent
        }
        None => return,
    };
    if let Some(parent) = parent {
        reorder_children(arena, parent);
    }
}

/// Stable-sort `parent`'s children by `position.x` ascending.
///
/// Ties keep their existing order, so repeated calls with unchanged
/// positions are no-ops.
///
/// # Panics
///
/// Panics if a child id no longer resolves; children of an occupied node
/// must outlive their membership in its child list.
pub fn reorder_children(arena: &mut NodeArena, parent: NodeId) {
    let children = match node(arena, parent) {
        Some(n) => n.children.clone(),
        None => return,
    };
    let mut keyed: Vec<(NodeId, f32)> = children
        .iter()
        .map(|&c| match node(arena, c) {
            Some(n) => (c, n.position.x),
            None => panic!("composite {parent} has a dangling child {c}"),
        })
        .collect();
    keyed.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    if let Some(parent_node) = node_mut(arena, parent) {
        parent_node.children.clear();
        parent_node.children.extend(keyed.into_iter().map(|(c, _)| c));
    }
}

/// Whether `node_id`'s subtree satisfies every child-count range.
///
/// Refreshes the advisory `setup_valid` cache on each visited node; the
/// editor renders the cached flag as a cue, nothing enforces it.
pub fn check_setup_validity(arena: &mut NodeArena, node_id: NodeId) -> bool {
    let (count, range, children) = match node(arena, node_id) {
        Some(n) => (n.child_count(), n.child_range, n.children.clone()),
        None => return false,
    };
    let mut valid = range.contains(count as i32);
    for child in children {
        valid &= check_setup_validity(arena, child);
    }
    if let Some(n) = node_mut(arena, node_id) {
        n.setup_valid = valid;
    }
    valid
}
