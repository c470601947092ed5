//! Undo/redo history: a stack of two stacks.
//!
//! `past` holds undoable commands, `future` redoable ones. Pushing a new
//! command clears `future` — and the history, as sole authority on command
//! lifetime, purges any bin-resident node that only the dropped commands
//! could have resurrected.

use sylva_core::NodeId;

use crate::command::EditCommand;
use crate::editor::{EditError, Editor};

/// Undo/redo stacks over [`EditCommand`]s.
pub struct History {
    past: Vec<EditCommand>,
    future: Vec<EditCommand>,
    limit: usize,
}

impl History {
    /// A history retaining at most `limit` undoable commands.
    ///
    /// `limit` normally comes from
    /// [`EditorConfig::history_limit`](crate::EditorConfig).
    pub fn new(limit: usize) -> Self {
        Self {
            past: Vec::new(),
            future: Vec::new(),
            limit,
        }
    }

    /// Execute `command` and make it the newest undoable step.
    ///
    /// On execute failure the command is dropped and nothing is recorded.
    /// On success the redo branch is discarded, and if the undo stack
    /// exceeds the limit the oldest command is evicted; dropped commands
    /// purge the bin-resident nodes only they could resurrect, except one
    /// that still anchors live children — that node stays in the bin.
    pub fn push(&mut self, mut command: EditCommand, editor: &mut Editor) -> Result<(), EditError> {
        command.execute(editor)?;
        let dropped: Vec<EditCommand> = self.future.drain(..).collect();
        self.past.push(command);
        self.purge_dropped(&dropped, editor);

        if self.past.len() > self.limit {
            let oldest = self.past.remove(0);
            self.purge_dropped(std::slice::from_ref(&oldest), editor);
        }
        Ok(())
    }

    /// Reverse the newest undoable command. Returns `false` when there is
    /// nothing to undo.
    pub fn undo(&mut self, editor: &mut Editor) -> bool {
        match self.past.pop() {
            Some(mut command) => {
                command.undo(editor);
                self.future.push(command);
                true
            }
            None => false,
        }
    }

    /// Re-apply the newest undone command. Returns `Ok(false)` when there
    /// is nothing to redo.
    pub fn redo(&mut self, editor: &mut Editor) -> Result<bool, EditError> {
        match self.future.pop() {
            Some(mut command) => match command.execute(editor) {
                Ok(()) => {
                    self.past.push(command);
                    Ok(true)
                }
                Err(e) => {
                    self.future.push(command);
                    Err(e)
                }
            },
            None => Ok(false),
        }
    }

    /// Whether an undo would do anything.
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Whether a redo would do anything.
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of undoable commands.
    pub fn undoable_len(&self) -> usize {
        self.past.len()
    }

    /// Number of redoable commands.
    pub fn redoable_len(&self) -> usize {
        self.future.len()
    }

    /// Purge nodes that `dropped` commands exclusively own.
    ///
    /// A node qualifies when it sits in the recycle bin, no command still
    /// in the history references it, and it anchors no live children. The
    /// last condition matters for evicted deletes: a delete keeps the
    /// node's subtree attached, so purging the node would leave every
    /// child with a stale parent id. Such a node stays in the bin instead.
    fn purge_dropped(&mut self, dropped: &[EditCommand], editor: &mut Editor) {
        let mut candidates: Vec<NodeId> = Vec::new();
        for command in dropped {
            command.resurrectable_nodes(&mut candidates);
        }
        for id in candidates {
            if !editor.arena().is_recycled(id) || self.references(id) {
                continue;
            }
            let anchors_live_children = editor
                .arena()
                .get_recycled(id)
                .is_some_and(|n| n.children.iter().any(|&c| editor.arena().is_live(c)));
            if anchors_live_children {
                continue;
            }
            if let Err(e) = editor.purge(id) {
                panic!("history purge of {id} failed: {e}");
            }
        }
    }

    fn references(&self, id: NodeId) -> bool {
        self.past
            .iter()
            .chain(self.future.iter())
            .any(|c| c.references(id))
    }
}
