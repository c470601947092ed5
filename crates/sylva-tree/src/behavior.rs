//! The [`LeafBehavior`] trait.
//!
//! Leaves are where a tree touches the host: dialogue playback, waits,
//! condition checks. The engine knows nothing about them beyond the kind
//! name on the node; behavior is registered per kind on the
//! [`Ticker`](crate::tick::Ticker) and dispatched by name.

use sylva_core::{Node, NodeId, TickStatus};

/// Host-defined behavior for one leaf kind.
///
/// # Contract
///
/// - `tick()` is called once per traversal that reaches a leaf of this
///   kind, with mutable access to the node (attributes included).
/// - A leaf MAY return [`TickStatus::Running`] across ticks; any
///   continuation state is the behavior's own business. The engine keeps
///   resumption bookkeeping only for composites.
/// - `stopped()` is invoked when the host stops evaluating a tree, so a
///   behavior holding per-node continuation state can drop it.
///
/// # Object safety
///
/// This trait is object-safe; the ticker stores behaviors as
/// `Box<dyn LeafBehavior>` keyed by kind name.
///
/// # Examples
///
/// A leaf that succeeds once a countdown stored in its attributes expires:
///
/// ```
/// use sylva_core::{Node, NodeId, TickStatus};
/// use sylva_tree::LeafBehavior;
///
/// struct Countdown;
///
/// impl LeafBehavior for Countdown {
///     fn tick(&mut self, _id: NodeId, node: &mut Node) -> TickStatus {
///         let left: i32 = node
///             .attribute("remaining")
///             .and_then(|v| v.parse().ok())
///             .unwrap_or(0);
///         if left <= 0 {
///             return TickStatus::Success;
///         }
///         node.set_attribute("remaining", (left - 1).to_string());
///         TickStatus::Running
///     }
/// }
/// ```
pub trait LeafBehavior {
    /// Tick one leaf node of this kind.
    fn tick(&mut self, id: NodeId, node: &mut Node) -> TickStatus;

    /// The host stopped evaluating the tree containing `id`.
    ///
    /// Default: nothing to drop.
    fn stopped(&mut self, id: NodeId) {
        let _ = id;
    }
}
