//! Tick engine: the single-threaded cooperative traversal.
//!
//! [`Ticker`] walks a tree from its root each host frame, dispatching leaf
//! ticks to registered [`LeafBehavior`]s and combining child outcomes per
//! composite kind. A composite that returns [`TickStatus::Running`] saves
//! the index of the running child; the next tick on that composite resumes
//! there and never re-visits earlier children until the running phase ends
//! with Success, Failure, or [`Ticker::alert_tick_stopped`].
//!
//! # Atomicity
//!
//! A tick call is synchronous and non-blocking. The host must not mutate
//! tree topology while a tick is in progress on that tree; a dangling child
//! id encountered mid-traversal is treated as a fatal invariant violation.

use std::time::Instant;

use indexmap::IndexMap;

use sylva_arena::NodeArena;
use sylva_core::{NodeId, NodeKind, TickError, TickStatus};

use crate::behavior::LeafBehavior;

// ── TickMetrics ──────────────────────────────────────────────────

/// Traversal counters for one tick call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickMetrics {
    /// Nodes entered, composites and leaves alike.
    pub nodes_visited: usize,
    /// Leaf behaviors dispatched.
    pub leaves_ticked: usize,
    /// Composites that resumed a saved running phase this call.
    pub composites_resumed: usize,
    /// Wall-clock duration of the traversal, in microseconds.
    pub total_us: u64,
}

// ── TickOutcome ──────────────────────────────────────────────────

/// Result of a successful tick call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickOutcome {
    /// The root's combined outcome; the host decides whether to re-tick.
    pub status: TickStatus,
    /// Traversal counters.
    pub metrics: TickMetrics,
}

// ── Ticker ───────────────────────────────────────────────────────

/// Drives tick traversals over one arena's trees.
///
/// Owns the leaf behavior registry, keyed by leaf kind name in registration
/// order. One ticker serves any number of trees in the same arena; all
/// resumption state lives on the nodes themselves.
#[derive(Default)]
pub struct Ticker {
    behaviors: IndexMap<String, Box<dyn LeafBehavior>>,
}

impl Ticker {
    /// A ticker with no registered behaviors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the behavior for a leaf kind.
    pub fn register_behavior(&mut self, name: impl Into<String>, behavior: Box<dyn LeafBehavior>) {
        self.behaviors.insert(name.into(), behavior);
    }

    /// Whether a behavior is registered for `name`.
    pub fn has_behavior(&self, name: &str) -> bool {
        self.behaviors.contains_key(name)
    }

    /// Tick the tree rooted at `root`.
    ///
    /// Children are visited in current child order; a composite resuming a
    /// running phase starts at its saved index.
    pub fn tick(&mut self, arena: &mut NodeArena, root: NodeId) -> Result<TickOutcome, TickError> {
        let start = Instant::now();
        let mut metrics = TickMetrics::default();
        let status = self.tick_node(arena, root, &mut metrics)?;
        metrics.total_us = start.elapsed().as_micros() as u64;
        Ok(TickOutcome { status, metrics })
    }

    fn tick_node(
        &mut self,
        arena: &mut NodeArena,
        id: NodeId,
        metrics: &mut TickMetrics,
    ) -> Result<TickStatus, TickError> {
        metrics.nodes_visited += 1;

        let leaf_name = match arena.get(id) {
            Some(node) => node.kind.leaf_name().map(str::to_string),
            None => return Err(TickError::NodeNotLive { node: id }),
        };

        match leaf_name {
            Some(name) => self.tick_leaf(arena, id, &name, metrics),
            None => self.tick_composite(arena, id, metrics),
        }
    }

    fn tick_leaf(
        &mut self,
        arena: &mut NodeArena,
        id: NodeId,
        name: &str,
        metrics: &mut TickMetrics,
    ) -> Result<TickStatus, TickError> {
        let behavior =
            self.behaviors
                .get_mut(name)
                .ok_or_else(|| TickError::UnknownLeafBehavior {
                    name: name.to_string(),
                    node: id,
                })?;
        let node = arena
            .get_mut(id)
            .unwrap_or_else(|| panic!("leaf {id} vanished mid-tick"));
        metrics.leaves_ticked += 1;
        Ok(behavior.tick(id, node))
    }

    fn tick_composite(
        &mut self,
        arena: &mut NodeArena,
        id: NodeId,
        metrics: &mut TickMetrics,
    ) -> Result<TickStatus, TickError> {
        let (children, start, is_sequence) = {
            let node = arena
                .get_mut(id)
                .unwrap_or_else(|| panic!("composite {id} vanished mid-tick"));
            let start = node.kind.last_running_child().unwrap_or(0);
            if node.kind.last_running_child().is_some() {
                metrics.composites_resumed += 1;
            }
            node.kind.set_last_running_child(None);
            node.last_ticked_child = None;
            let is_sequence = matches!(node.kind, NodeKind::Sequence { .. });
            (node.children.clone(), start, is_sequence)
        };

        // Success continues a sequence; failure continues a fallback.
        let short_circuit = if is_sequence {
            TickStatus::Failure
        } else {
            TickStatus::Success
        };

        for (index, &child) in children.iter().enumerate() {
            if index < start {
                continue;
            }
            if !arena.is_live(child) {
                panic!("composite {id} has a dangling child {child}");
            }
            let status = self.tick_node(arena, child, metrics)?;

            let node = arena
                .get_mut(id)
                .unwrap_or_else(|| panic!("composite {id} vanished mid-tick"));
            node.last_ticked_child = Some(child);
            if status == short_circuit {
                return Ok(status);
            }
            if status == TickStatus::Running {
                node.kind.set_last_running_child(Some(index));
                return Ok(TickStatus::Running);
            }
        }

        // Every child continued (or there were none): the vacuous outcome.
        if let Some(&last) = children.last() {
            if let Some(node) = arena.get_mut(id) {
                node.last_ticked_child = Some(last);
            }
        }
        Ok(if is_sequence {
            TickStatus::Success
        } else {
            TickStatus::Failure
        })
    }

    /// The host stopped evaluating the tree at `id`.
    ///
    /// Recursively clears composite resumption state and flow indicators,
    /// and notifies leaf behaviors via [`LeafBehavior::stopped`], so the
    /// next tick re-enters every composite from its first child.
    pub fn alert_tick_stopped(&mut self, arena: &mut NodeArena, id: NodeId) {
        let (children, leaf_name) = match arena.get_mut(id) {
            Some(node) => {
                node.reset_tick_state();
                (node.children.clone(), node.kind.leaf_name().map(str::to_string))
            }
            None => return,
        };

        if let Some(name) = leaf_name {
            if let Some(behavior) = self.behaviors.get_mut(&name) {
                behavior.stopped(id);
            }
        }

        for child in children {
            self.alert_tick_stopped(arena, child);
        }
    }
}
