//! Reversible editor commands.
//!
//! [`EditCommand`] is a tagged variant: each concrete command carries the
//! node ids and snapshot data (positions, kind names) it needs to run in
//! both directions. The placing variants remember the node they created so
//! a redo resurrects the *same identity* instead of minting a new node.
//!
//! Execute is fallible and atomic: a command that returns an error has not
//! changed observable state and must not be pushed to the history. Undo is
//! infallible — undoing an executed command whose world was restored by
//! the history's discipline cannot conflict; if it does, that is a command
//! bug and the process aborts with a diagnostic.

use sylva_core::{NodeId, Point2};
use sylva_tree::graph;

use crate::editor::{EditError, Editor};

/// A unit of reversible editor work.
#[derive(Debug)]
pub enum EditCommand {
    /// Place a catalog clone at a position.
    Place {
        /// Catalog kind to instantiate.
        kind: String,
        /// Placement position.
        position: Point2,
        /// The node created on first execute; re-executes restore it.
        node: Option<NodeId>,
    },
    /// Delete one node (its children stay attached to it in the bin).
    Delete {
        /// The node to delete.
        node: NodeId,
        /// Parent observed at execute time, re-attached on undo.
        parent: Option<NodeId>,
        /// Slot among the parent's children at execute time; undo puts the
        /// node back there, since sibling order is traversal order.
        child_index: usize,
    },
    /// Move one node, re-sorting its siblings.
    Move {
        /// The node to move.
        node: NodeId,
        /// Destination.
        to: Point2,
        /// Origin, restored on undo.
        from: Point2,
        /// Parent observed at execute time.
        parent: Option<NodeId>,
        /// Sibling order before the execute-time re-sort, restored on undo.
        /// A snapshot rather than a re-sort: under position ties a sort
        /// would not reproduce the original order.
        prior_order: Vec<NodeId>,
    },
    /// Connect an existing child under an existing parent.
    Connect {
        /// The receiving composite.
        parent: NodeId,
        /// The node to attach.
        child: NodeId,
    },
    /// Detach one or more children from a parent.
    Disconnect {
        /// The composite to detach from.
        parent: NodeId,
        /// Children to detach, replayed on every execute.
        children: Vec<NodeId>,
        /// `(child, slot)` pairs observed at execute time; undo reinserts
        /// ascending so each child lands back where it was.
        detached: Vec<(NodeId, usize)>,
    },
    /// Place a catalog clone and connect it to an anchor in one step.
    PlaceAndConnect {
        /// Catalog kind to instantiate.
        kind: String,
        /// Placement position.
        position: Point2,
        /// The existing node to connect to.
        anchor: NodeId,
        /// If true the anchor becomes the new node's child; otherwise the
        /// new node becomes the anchor's child.
        anchor_is_child: bool,
        /// The node created on first execute; re-executes restore it.
        node: Option<NodeId>,
    },
    /// Execute a list of commands as one undoable step.
    Batch(Vec<EditCommand>),
}

impl EditCommand {
    /// Place `kind` at `position`.
    pub fn place(kind: impl Into<String>, position: Point2) -> Self {
        Self::Place {
            kind: kind.into(),
            position,
            node: None,
        }
    }

    /// Delete `node`.
    pub fn delete(node: NodeId) -> Self {
        Self::Delete {
            node,
            parent: None,
            child_index: 0,
        }
    }

    /// Move `node` from `from` to `to`.
    pub fn move_node(node: NodeId, to: Point2, from: Point2) -> Self {
        Self::Move {
            node,
            to,
            from,
            parent: None,
            prior_order: Vec::new(),
        }
    }

    /// Connect `child` under `parent`.
    pub fn connect(parent: NodeId, child: NodeId) -> Self {
        Self::Connect { parent, child }
    }

    /// Detach `children` from `parent`.
    pub fn disconnect(parent: NodeId, children: Vec<NodeId>) -> Self {
        Self::Disconnect {
            parent,
            children,
            detached: Vec::new(),
        }
    }

    /// Place `kind` at `position` and connect it to `anchor`.
    pub fn place_and_connect(
        kind: impl Into<String>,
        position: Point2,
        anchor: NodeId,
        anchor_is_child: bool,
    ) -> Self {
        Self::PlaceAndConnect {
            kind: kind.into(),
            position,
            anchor,
            anchor_is_child,
            node: None,
        }
    }

    /// Bundle `commands` into one undoable step.
    pub fn batch(commands: Vec<EditCommand>) -> Self {
        Self::Batch(commands)
    }

    // ── Execute ──────────────────────────────────────────────────

    /// Apply this command to the editor.
    ///
    /// On error, observable state is unchanged and the command must not be
    /// pushed to the history.
    pub fn execute(&mut self, editor: &mut Editor) -> Result<(), EditError> {
        match self {
            Self::Place {
                kind,
                position,
                node,
            } => match *node {
                None => {
                    *node = Some(editor.place_node(kind, *position)?);
                    Ok(())
                }
                Some(id) => editor.restore(id),
            },

            Self::Delete {
                node,
                parent,
                child_index,
            } => {
                let observed = match editor.arena().get(*node) {
                    Some(n) => {
                        if !n.is_deletable() {
                            return Err(EditError::NotDeletable { node: *node });
                        }
                        n.parent
                    }
                    None => {
                        return Err(EditError::Tree(sylva_core::TreeError::NotLive {
                            node: *node,
                        }))
                    }
                };
                *parent = observed;
                if let Some(p) = observed {
                    *child_index = child_slot(editor, p, *node);
                    graph::remove_child(editor.arena_mut(), p, *node);
                }
                editor.recycle(*node)
            }

            Self::Move {
                node,
                to,
                parent,
                prior_order,
                ..
            } => {
                let observed = match editor.arena().get(*node) {
                    Some(n) => {
                        if !n.is_movable() {
                            return Err(EditError::NotMovable { node: *node });
                        }
                        n.parent
                    }
                    None => {
                        return Err(EditError::Tree(sylva_core::TreeError::NotLive {
                            node: *node,
                        }))
                    }
                };
                *parent = observed;
                *prior_order = match observed {
                    Some(p) => sibling_order(editor, p),
                    None => Vec::new(),
                };
                graph::move_node(editor.arena_mut(), *node, *to);
                Ok(())
            }

            Self::Connect { parent, child } => {
                graph::add_child(editor.arena_mut(), *parent, *child)?;
                graph::reorder_children(editor.arena_mut(), *parent);
                Ok(())
            }

            Self::Disconnect {
                parent,
                children,
                detached,
            } => {
                detached.clear();
                for &child in children.iter() {
                    detached.push((child, child_slot(editor, *parent, child)));
                }
                // Slots are captured against the original order before the
                // first removal shifts anything; absent children drop out.
                detached.retain(|&(child, _)| {
                    graph::remove_child(editor.arena_mut(), *parent, child).is_some()
                });
                // Undo reinserts ascending, so each slot is exact again.
                detached.sort_by_key(|&(_, slot)| slot);
                Ok(())
            }

            Self::PlaceAndConnect {
                kind,
                position,
                anchor,
                anchor_is_child,
                node,
            } => {
                let (id, newly_placed) = match *node {
                    None => (editor.place_node(kind, *position)?, true),
                    Some(id) => {
                        editor.restore(id)?;
                        (id, false)
                    }
                };
                *node = Some(id);

                let connected = if *anchor_is_child {
                    graph::add_child(editor.arena_mut(), id, *anchor)
                } else {
                    graph::add_child(editor.arena_mut(), *anchor, id)
                };
                if let Err(e) = connected {
                    // Unwind the placement so a failed execute leaves no trace.
                    if let Err(unwind) = editor.recycle(id) {
                        panic!("failed to unwind placement of {id}: {unwind}");
                    }
                    if newly_placed {
                        if let Err(unwind) = editor.purge(id) {
                            panic!("failed to unwind placement of {id}: {unwind}");
                        }
                        *node = None;
                    }
                    return Err(e.into());
                }

                let reorder_target = if *anchor_is_child { id } else { *anchor };
                graph::reorder_children(editor.arena_mut(), reorder_target);
                Ok(())
            }

            Self::Batch(commands) => {
                let mut done = 0;
                let mut failure = None;
                for command in commands.iter_mut() {
                    if let Err(e) = command.execute(editor) {
                        failure = Some(e);
                        break;
                    }
                    done += 1;
                }
                match failure {
                    Some(e) => {
                        // Unwind the executed prefix so the batch is atomic.
                        // A failed command is never pushed, so nodes the
                        // prefix created would be stranded in the bin with
                        // no resurrection path; forget them entirely.
                        for command in commands[..done].iter_mut().rev() {
                            command.undo(editor);
                            command.forget_created(editor);
                        }
                        Err(e)
                    }
                    None => Ok(()),
                }
            }
        }
    }

    // ── Undo ─────────────────────────────────────────────────────

    /// Reverse this command's execute.
    ///
    /// # Panics
    ///
    /// Panics if the command never executed (placing variants with no
    /// remembered node) or if the world no longer admits the reversal;
    /// both are command-sequencing bugs.
    pub fn undo(&mut self, editor: &mut Editor) {
        match self {
            Self::Place { node, .. } => {
                let id = match *node {
                    Some(id) => id,
                    None => panic!("undo of a place command that never executed"),
                };
                if let Err(e) = editor.recycle(id) {
                    panic!("undo failed to recycle {id}: {e}");
                }
            }

            Self::Delete {
                node,
                parent,
                child_index,
            } => {
                if let Err(e) = editor.restore(*node) {
                    panic!("undo failed to restore {node}: {e}");
                }
                if let Some(p) = *parent {
                    reattach(editor, p, *node, *child_index);
                }
            }

            Self::Move {
                node,
                from,
                parent,
                prior_order,
                ..
            } => {
                graph::move_node(editor.arena_mut(), *node, *from);
                // move_node re-sorts by position, which under ties need not
                // reproduce the captured order; restore it verbatim.
                if let Some(p) = *parent {
                    graph::restore_child_order(editor.arena_mut(), p, prior_order);
                }
            }

            Self::Connect { parent, child } => {
                graph::remove_child(editor.arena_mut(), *parent, *child);
            }

            Self::Disconnect {
                parent, detached, ..
            } => {
                // Ascending original slots: each insert lands exactly where
                // the child was detached from.
                for &(child, slot) in detached.iter() {
                    reattach(editor, *parent, child, slot);
                }
            }

            Self::PlaceAndConnect {
                anchor,
                anchor_is_child,
                node,
                ..
            } => {
                let id = match *node {
                    Some(id) => id,
                    None => panic!("undo of a place-and-connect command that never executed"),
                };
                if *anchor_is_child {
                    graph::remove_child(editor.arena_mut(), id, *anchor);
                } else {
                    graph::remove_child(editor.arena_mut(), *anchor, id);
                }
                if let Err(e) = editor.recycle(id) {
                    panic!("undo failed to recycle {id}: {e}");
                }
            }

            Self::Batch(commands) => {
                // Reverse order: later commands saw the earlier ones' effects.
                for command in commands.iter_mut().rev() {
                    command.undo(editor);
                }
            }
        }
    }

    // ── History bookkeeping ──────────────────────────────────────

    /// Whether this command (or any nested one) mentions `id`.
    pub fn references(&self, id: NodeId) -> bool {
        match self {
            Self::Place { node, .. } => *node == Some(id),
            Self::Delete { node, parent, .. } => *node == id || *parent == Some(id),
            Self::Move {
                node,
                parent,
                prior_order,
                ..
            } => *node == id || *parent == Some(id) || prior_order.contains(&id),
            Self::Connect { parent, child } => *parent == id || *child == id,
            Self::Disconnect {
                parent, children, ..
            } => *parent == id || children.contains(&id),
            Self::PlaceAndConnect { anchor, node, .. } => *anchor == id || *node == Some(id),
            Self::Batch(commands) => commands.iter().any(|c| c.references(id)),
        }
    }

    /// Purge and forget any node this command created that now sits in the
    /// recycle bin, returning the command to its never-executed state.
    ///
    /// Used when an execute is abandoned (batch unwind): the command will
    /// not reach the history, so nothing could ever resurrect the node.
    fn forget_created(&mut self, editor: &mut Editor) {
        match self {
            Self::Place { node, .. } | Self::PlaceAndConnect { node, .. } => {
                if let Some(id) = *node {
                    if editor.arena().is_recycled(id) {
                        if let Err(e) = editor.purge(id) {
                            panic!("failed to discard abandoned node {id}: {e}");
                        }
                        *node = None;
                    }
                }
            }
            Self::Batch(commands) => {
                for command in commands {
                    command.forget_created(editor);
                }
            }
            Self::Delete { .. } | Self::Move { .. } | Self::Connect { .. }
            | Self::Disconnect { .. } => {}
        }
    }

    /// Collect the nodes whose stay in the recycle bin this command can
    /// reverse: nodes it created (redo restores them) and nodes it deleted
    /// (undo restores them). When the command is dropped from the history,
    /// such a node with no other referencing command is gone for good and
    /// must be purged.
    pub fn resurrectable_nodes(&self, out: &mut Vec<NodeId>) {
        match self {
            Self::Place { node, .. } | Self::PlaceAndConnect { node, .. } => {
                if let Some(id) = *node {
                    out.push(id);
                }
            }
            Self::Delete { node, .. } => out.push(*node),
            Self::Move { .. } | Self::Connect { .. } | Self::Disconnect { .. } => {}
            Self::Batch(commands) => {
                for command in commands {
                    command.resurrectable_nodes(out);
                }
            }
        }
    }
}

/// Re-attach `child` at `slot` under `parent` during an undo.
fn reattach(editor: &mut Editor, parent: NodeId, child: NodeId, slot: usize) {
    if let Err(e) = graph::insert_child(editor.arena_mut(), parent, child, slot) {
        panic!("undo failed to re-attach {child} under {parent}: {e}");
    }
}

/// Position of `child` among `parent`'s children, 0 when absent.
fn child_slot(editor: &Editor, parent: NodeId, child: NodeId) -> usize {
    editor
        .arena()
        .get(parent)
        .or_else(|| editor.arena().get_recycled(parent))
        .and_then(|n| n.children.iter().position(|&c| c == child))
        .unwrap_or(0)
}

/// Snapshot of `parent`'s current child order.
fn sibling_order(editor: &Editor, parent: NodeId) -> Vec<NodeId> {
    editor
        .arena()
        .get(parent)
        .or_else(|| editor.arena().get_recycled(parent))
        .map(|n| n.children.to_vec())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sylva_core::{Node, NodeKind, TreeError};
    use sylva_tree::Catalog;

    fn editor() -> Editor {
        let mut catalog = Catalog::standard();
        catalog
            .register("Wait", Node::new(NodeKind::leaf("Wait")))
            .unwrap();
        Editor::new(catalog)
    }

    fn children_of(editor: &Editor, id: NodeId) -> Vec<NodeId> {
        editor.arena().get(id).unwrap().children.to_vec()
    }

    // ── Place ────────────────────────────────────────────────────

    #[test]
    fn place_execute_undo_execute_keeps_the_identity() {
        let mut editor = editor();
        let mut cmd = EditCommand::place("Wait", Point2::new(5.0, 5.0));

        cmd.execute(&mut editor).unwrap();
        let id = match cmd {
            EditCommand::Place { node: Some(id), .. } => id,
            ref other => panic!("expected executed Place, got {other:?}"),
        };
        assert!(editor.arena().is_live(id));

        cmd.undo(&mut editor);
        assert!(editor.arena().is_recycled(id));

        cmd.execute(&mut editor).unwrap();
        assert!(editor.arena().is_live(id));
        assert_eq!(
            editor.arena().get(id).unwrap().position,
            Point2::new(5.0, 5.0)
        );
    }

    #[test]
    #[should_panic(expected = "never executed")]
    fn undoing_an_unexecuted_place_is_a_bug() {
        let mut editor = editor();
        let mut cmd = EditCommand::place("Wait", Point2::ZERO);
        cmd.undo(&mut editor);
    }

    // ── Delete ───────────────────────────────────────────────────

    #[test]
    fn delete_detaches_and_undo_reattaches() {
        let mut editor = editor();
        let root = editor.place_root("Sequence", Point2::ZERO).unwrap();
        let leaf = editor.place_node("Wait", Point2::new(0.0, -60.0)).unwrap();
        graph::add_child(editor.arena_mut(), root, leaf).unwrap();

        let mut cmd = EditCommand::delete(leaf);
        cmd.execute(&mut editor).unwrap();
        assert!(editor.arena().is_recycled(leaf));
        assert!(children_of(&editor, root).is_empty());

        cmd.undo(&mut editor);
        assert!(editor.arena().is_live(leaf));
        assert_eq!(children_of(&editor, root), vec![leaf]);
        assert_eq!(editor.arena().get(leaf).unwrap().parent, Some(root));
    }

    #[test]
    fn delete_keeps_the_subtree_attached_to_the_binned_node() {
        let mut editor = editor();
        let root = editor.place_root("Sequence", Point2::ZERO).unwrap();
        let a = editor.place_node("Sequence", Point2::new(0.0, -60.0)).unwrap();
        let b = editor.place_node("Wait", Point2::new(0.0, -120.0)).unwrap();
        graph::add_child(editor.arena_mut(), root, a).unwrap();
        graph::add_child(editor.arena_mut(), a, b).unwrap();

        let mut cmd = EditCommand::delete(a);
        cmd.execute(&mut editor).unwrap();

        // Only the single node is deleted; B stays its child.
        assert!(editor.arena().is_recycled(a));
        assert!(editor.arena().is_live(b));
        assert!(editor.arena().get_recycled(a).unwrap().is_child(b));
        assert!(children_of(&editor, root).is_empty());

        cmd.undo(&mut editor);
        assert_eq!(children_of(&editor, root), vec![a]);
        assert_eq!(children_of(&editor, a), vec![b]);
    }

    #[test]
    fn delete_undo_restores_the_original_slot() {
        let mut editor = editor();
        let parent = editor.place_node("Sequence", Point2::ZERO).unwrap();
        let a = editor.place_node("Wait", Point2::new(0.0, -60.0)).unwrap();
        let b = editor.place_node("Wait", Point2::new(10.0, -60.0)).unwrap();
        let c = editor.place_node("Wait", Point2::new(20.0, -60.0)).unwrap();
        for id in [a, b, c] {
            graph::add_child(editor.arena_mut(), parent, id).unwrap();
        }

        let mut cmd = EditCommand::delete(b);
        cmd.execute(&mut editor).unwrap();
        assert_eq!(children_of(&editor, parent), vec![a, c]);

        cmd.undo(&mut editor);
        assert_eq!(children_of(&editor, parent), vec![a, b, c]);
    }

    #[test]
    fn the_root_is_not_deletable() {
        let mut editor = editor();
        let root = editor.place_root("Sequence", Point2::ZERO).unwrap();
        let mut cmd = EditCommand::delete(root);
        assert_eq!(
            cmd.execute(&mut editor),
            Err(EditError::NotDeletable { node: root })
        );
        assert!(editor.arena().is_live(root));
    }

    // ── Move ─────────────────────────────────────────────────────

    #[test]
    fn move_reorders_on_execute_and_on_undo() {
        let mut editor = editor();
        let parent = editor.place_node("Sequence", Point2::ZERO).unwrap();
        let a = editor.place_node("Wait", Point2::new(0.0, -60.0)).unwrap();
        let b = editor.place_node("Wait", Point2::new(10.0, -60.0)).unwrap();
        let c = editor.place_node("Wait", Point2::new(20.0, -60.0)).unwrap();
        for id in [a, b, c] {
            graph::add_child(editor.arena_mut(), parent, id).unwrap();
        }

        let mut cmd = EditCommand::move_node(a, Point2::new(30.0, -60.0), Point2::new(0.0, -60.0));
        cmd.execute(&mut editor).unwrap();
        assert_eq!(children_of(&editor, parent), vec![b, c, a]);

        cmd.undo(&mut editor);
        assert_eq!(
            editor.arena().get(a).unwrap().position,
            Point2::new(0.0, -60.0)
        );
        assert_eq!(children_of(&editor, parent), vec![a, b, c]);
    }

    #[test]
    fn the_root_is_not_movable() {
        let mut editor = editor();
        let root = editor.place_root("Sequence", Point2::new(1.0, 2.0)).unwrap();
        let mut cmd = EditCommand::move_node(root, Point2::new(9.0, 9.0), Point2::new(1.0, 2.0));
        assert_eq!(
            cmd.execute(&mut editor),
            Err(EditError::NotMovable { node: root })
        );
        assert_eq!(
            editor.arena().get(root).unwrap().position,
            Point2::new(1.0, 2.0)
        );
    }

    // ── Connect / Disconnect ─────────────────────────────────────

    #[test]
    fn connect_sorts_the_new_child_into_place() {
        let mut editor = editor();
        let parent = editor.place_node("Sequence", Point2::ZERO).unwrap();
        let right = editor.place_node("Wait", Point2::new(20.0, -60.0)).unwrap();
        graph::add_child(editor.arena_mut(), parent, right).unwrap();
        let left = editor.place_node("Wait", Point2::new(-20.0, -60.0)).unwrap();

        let mut cmd = EditCommand::connect(parent, left);
        cmd.execute(&mut editor).unwrap();
        assert_eq!(children_of(&editor, parent), vec![left, right]);

        cmd.undo(&mut editor);
        assert_eq!(children_of(&editor, parent), vec![right]);
        assert_eq!(editor.arena().get(left).unwrap().parent, None);
    }

    #[test]
    fn connect_rejects_cycles_without_mutating() {
        let mut editor = editor();
        let outer = editor.place_node("Sequence", Point2::ZERO).unwrap();
        let inner = editor.place_node("Sequence", Point2::new(0.0, -60.0)).unwrap();
        graph::add_child(editor.arena_mut(), outer, inner).unwrap();

        let mut cmd = EditCommand::connect(inner, outer);
        assert_eq!(
            cmd.execute(&mut editor),
            Err(EditError::Tree(TreeError::CycleWouldForm {
                parent: inner,
                child: outer
            }))
        );
        assert_eq!(children_of(&editor, inner), Vec::<NodeId>::new());
    }

    #[test]
    fn disconnect_replays_its_list_on_undo() {
        let mut editor = editor();
        let parent = editor.place_node("Sequence", Point2::ZERO).unwrap();
        let a = editor.place_node("Wait", Point2::new(0.0, -60.0)).unwrap();
        let b = editor.place_node("Wait", Point2::new(10.0, -60.0)).unwrap();
        let c = editor.place_node("Wait", Point2::new(20.0, -60.0)).unwrap();
        for id in [a, b, c] {
            graph::add_child(editor.arena_mut(), parent, id).unwrap();
        }

        let mut cmd = EditCommand::disconnect(parent, vec![a, c]);
        cmd.execute(&mut editor).unwrap();
        assert_eq!(children_of(&editor, parent), vec![b]);
        assert_eq!(editor.arena().get(a).unwrap().parent, None);

        cmd.undo(&mut editor);
        assert_eq!(children_of(&editor, parent), vec![a, b, c]);
    }

    #[test]
    fn disconnect_restores_slots_regardless_of_list_order() {
        let mut editor = editor();
        let parent = editor.place_node("Sequence", Point2::ZERO).unwrap();
        let a = editor.place_node("Wait", Point2::new(0.0, -60.0)).unwrap();
        let b = editor.place_node("Wait", Point2::new(10.0, -60.0)).unwrap();
        let c = editor.place_node("Wait", Point2::new(20.0, -60.0)).unwrap();
        for id in [a, b, c] {
            graph::add_child(editor.arena_mut(), parent, id).unwrap();
        }

        // The list names the children back-to-front.
        let mut cmd = EditCommand::disconnect(parent, vec![c, a]);
        cmd.execute(&mut editor).unwrap();
        assert_eq!(children_of(&editor, parent), vec![b]);

        cmd.undo(&mut editor);
        assert_eq!(children_of(&editor, parent), vec![a, b, c]);
    }

    #[test]
    fn move_undo_restores_order_under_position_ties() {
        let mut editor = editor();
        let parent = editor.place_node("Sequence", Point2::ZERO).unwrap();
        let a = editor.place_node("Wait", Point2::new(5.0, -60.0)).unwrap();
        let b = editor.place_node("Wait", Point2::new(5.0, -60.0)).unwrap();
        for id in [a, b] {
            graph::add_child(editor.arena_mut(), parent, id).unwrap();
        }

        let mut cmd = EditCommand::move_node(a, Point2::new(50.0, -60.0), Point2::new(5.0, -60.0));
        cmd.execute(&mut editor).unwrap();
        assert_eq!(children_of(&editor, parent), vec![b, a]);

        // A sort on undo would tie-break to [b, a]; the snapshot wins.
        cmd.undo(&mut editor);
        assert_eq!(children_of(&editor, parent), vec![a, b]);
    }

    // ── PlaceAndConnect ──────────────────────────────────────────

    #[test]
    fn place_and_connect_below_makes_the_new_node_a_child() {
        let mut editor = editor();
        let root = editor.place_root("Sequence", Point2::ZERO).unwrap();

        let mut cmd =
            EditCommand::place_and_connect("Wait", Point2::new(10.0, -60.0), root, false);
        cmd.execute(&mut editor).unwrap();

        let id = match cmd {
            EditCommand::PlaceAndConnect { node: Some(id), .. } => id,
            ref other => panic!("expected executed PlaceAndConnect, got {other:?}"),
        };
        assert_eq!(children_of(&editor, root), vec![id]);
        assert_eq!(editor.arena().get(id).unwrap().parent, Some(root));
    }

    #[test]
    fn place_and_connect_above_adopts_the_anchor() {
        let mut editor = editor();
        let leaf = editor.place_node("Wait", Point2::new(0.0, -60.0)).unwrap();

        let mut cmd = EditCommand::place_and_connect("Sequence", Point2::ZERO, leaf, true);
        cmd.execute(&mut editor).unwrap();

        let id = match cmd {
            EditCommand::PlaceAndConnect { node: Some(id), .. } => id,
            ref other => panic!("expected executed PlaceAndConnect, got {other:?}"),
        };
        assert_eq!(children_of(&editor, id), vec![leaf]);
        assert_eq!(editor.arena().get(leaf).unwrap().parent, Some(id));

        cmd.undo(&mut editor);
        assert!(editor.arena().is_recycled(id));
        assert_eq!(editor.arena().get(leaf).unwrap().parent, None);
    }

    #[test]
    fn failed_connection_unwinds_the_placement() {
        let mut editor = editor();
        let root = editor.place_root("Sequence", Point2::ZERO).unwrap();
        let live_before = editor.arena().live_count();

        // The anchor id is stale: nothing was ever stored for it.
        let ghost = NodeId::new(99, 3);
        let mut cmd = EditCommand::place_and_connect("Wait", Point2::ZERO, ghost, false);
        assert!(cmd.execute(&mut editor).is_err());

        assert_eq!(editor.arena().live_count(), live_before);
        assert_eq!(editor.arena().recycled_count(), 0);
        assert!(editor.arena().is_live(root));
    }

    // ── Batch ────────────────────────────────────────────────────

    #[test]
    fn batch_undoes_in_reverse_order() {
        let mut editor = editor();
        let root = editor.place_root("Sequence", Point2::ZERO).unwrap();
        let leaf = editor.place_node("Wait", Point2::new(0.0, -60.0)).unwrap();

        // Connect, then move: undo must detach only after un-moving.
        let mut cmd = EditCommand::batch(vec![
            EditCommand::connect(root, leaf),
            EditCommand::move_node(leaf, Point2::new(50.0, -60.0), Point2::new(0.0, -60.0)),
        ]);
        cmd.execute(&mut editor).unwrap();
        assert_eq!(children_of(&editor, root), vec![leaf]);
        assert_eq!(
            editor.arena().get(leaf).unwrap().position,
            Point2::new(50.0, -60.0)
        );

        cmd.undo(&mut editor);
        assert_eq!(children_of(&editor, root), Vec::<NodeId>::new());
        assert_eq!(
            editor.arena().get(leaf).unwrap().position,
            Point2::new(0.0, -60.0)
        );
    }

    #[test]
    fn failed_batch_unwinds_its_prefix() {
        let mut editor = editor();
        let root = editor.place_root("Sequence", Point2::ZERO).unwrap();
        let leaf = editor.place_node("Wait", Point2::new(0.0, -60.0)).unwrap();

        let mut cmd = EditCommand::batch(vec![
            EditCommand::connect(root, leaf),
            EditCommand::delete(root), // fails: roots are not deletable
        ]);
        assert_eq!(
            cmd.execute(&mut editor),
            Err(EditError::NotDeletable { node: root })
        );

        // The successful connect was rolled back.
        assert_eq!(children_of(&editor, root), Vec::<NodeId>::new());
        assert_eq!(editor.arena().get(leaf).unwrap().parent, None);
    }

    #[test]
    fn failed_batch_leaves_no_bin_residue_from_placements() {
        let mut editor = editor();
        let root = editor.place_root("Sequence", Point2::ZERO).unwrap();

        let mut cmd = EditCommand::batch(vec![
            EditCommand::place("Wait", Point2::new(0.0, -60.0)),
            EditCommand::delete(root), // fails: roots are not deletable
        ]);
        assert!(cmd.execute(&mut editor).is_err());

        assert_eq!(editor.arena().live_count(), 1); // just the root
        assert_eq!(editor.arena().recycled_count(), 0);
    }

    // ── Bookkeeping ──────────────────────────────────────────────

    #[test]
    fn references_sees_through_batches() {
        let mut editor = editor();
        let a = editor.place_node("Wait", Point2::ZERO).unwrap();
        let b = editor.place_node("Wait", Point2::ZERO).unwrap();
        let parent = editor.place_node("Sequence", Point2::ZERO).unwrap();

        let cmd = EditCommand::batch(vec![
            EditCommand::connect(parent, a),
            EditCommand::move_node(b, Point2::ZERO, Point2::ZERO),
        ]);
        assert!(cmd.references(a));
        assert!(cmd.references(b));
        assert!(cmd.references(parent));
        assert!(!cmd.references(NodeId::new(42, 0)));
    }

    #[test]
    fn resurrectable_nodes_cover_created_and_deleted() {
        let mut editor = editor();
        let victim = editor.place_node("Wait", Point2::ZERO).unwrap();

        let mut place = EditCommand::place("Wait", Point2::ZERO);
        place.execute(&mut editor).unwrap();
        let mut out = Vec::new();
        place.resurrectable_nodes(&mut out);
        assert_eq!(out.len(), 1);

        let delete = EditCommand::delete(victim);
        out.clear();
        delete.resurrectable_nodes(&mut out);
        assert_eq!(out, vec![victim]);
    }
}
