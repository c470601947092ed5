//! Standard leaf behaviors for tree and editor testing:
//!
//! - [`AlwaysSucceed`] / [`AlwaysFail`] — constant outcomes.
//! - [`ScriptedLeaf`] — replays per-node outcome queues from a shared
//!   [`LeafScript`], recording dispatch order in a shared [`TickLog`].
//!
//! The shared handles exist because behaviors are boxed into the ticker at
//! registration time, while the node ids they should react to are only
//! known after placement. Trees are single-threaded, so plain `Rc` works.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use sylva_core::{Node, NodeId, TickStatus};
use sylva_tree::LeafBehavior;

/// Leaf behavior that always reports [`TickStatus::Success`].
pub struct AlwaysSucceed;

impl LeafBehavior for AlwaysSucceed {
    fn tick(&mut self, _id: NodeId, _node: &mut Node) -> TickStatus {
        TickStatus::Success
    }
}

/// Leaf behavior that always reports [`TickStatus::Failure`].
pub struct AlwaysFail;

impl LeafBehavior for AlwaysFail {
    fn tick(&mut self, _id: NodeId, _node: &mut Node) -> TickStatus {
        TickStatus::Failure
    }
}

/// Shared per-node outcome queues, writable after the behavior is boxed.
#[derive(Clone, Default)]
pub struct LeafScript {
    queues: Rc<RefCell<HashMap<NodeId, VecDeque<TickStatus>>>>,
}

impl LeafScript {
    /// An empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the outcome queue for `id`.
    pub fn set(&self, id: NodeId, statuses: &[TickStatus]) {
        self.queues
            .borrow_mut()
            .insert(id, statuses.iter().copied().collect());
    }

    /// Append one outcome to `id`'s queue.
    pub fn push(&self, id: NodeId, status: TickStatus) {
        self.queues.borrow_mut().entry(id).or_default().push_back(status);
    }

    fn pop(&self, id: NodeId) -> Option<TickStatus> {
        self.queues
            .borrow_mut()
            .get_mut(&id)
            .and_then(VecDeque::pop_front)
    }
}

/// Shared record of leaf dispatches, in order.
#[derive(Clone, Default)]
pub struct TickLog {
    entries: Rc<RefCell<Vec<NodeId>>>,
}

impl TickLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry.
    pub fn record(&self, id: NodeId) {
        self.entries.borrow_mut().push(id);
    }

    /// Snapshot of the entries so far.
    pub fn entries(&self) -> Vec<NodeId> {
        self.entries.borrow().clone()
    }

    /// Number of entries so far.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

/// Leaf behavior driven by a [`LeafScript`].
///
/// Each tick pops the node's next scripted outcome, falling back to the
/// configured default (Success unless overridden) when the queue is empty.
/// Dispatches land in the tick log; `stopped()` notifications land in the
/// stop log.
pub struct ScriptedLeaf {
    script: LeafScript,
    log: TickLog,
    stop_log: TickLog,
    default: TickStatus,
}

impl ScriptedLeaf {
    /// A scripted leaf defaulting to [`TickStatus::Success`].
    pub fn new(script: LeafScript, log: TickLog) -> Self {
        Self {
            script,
            log,
            stop_log: TickLog::new(),
            default: TickStatus::Success,
        }
    }

    /// Override the outcome used when a node's queue is empty.
    pub fn with_default(mut self, default: TickStatus) -> Self {
        self.default = default;
        self
    }

    /// Record `stopped()` notifications into `log`.
    pub fn with_stop_log(mut self, log: TickLog) -> Self {
        self.stop_log = log;
        self
    }
}

impl LeafBehavior for ScriptedLeaf {
    fn tick(&mut self, id: NodeId, _node: &mut Node) -> TickStatus {
        self.log.record(id);
        self.script.pop(id).unwrap_or(self.default)
    }

    fn stopped(&mut self, id: NodeId) {
        self.stop_log.record(id);
    }
}
