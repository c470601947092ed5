//! Tree model, node catalog, and tick engine for the Sylva behavior-tree
//! framework.
//!
//! Three cooperating pieces over one [`NodeArena`](sylva_arena::NodeArena):
//!
//! - [`graph`] — topology mutation and queries (connect, detach, reorder,
//!   ancestry, setup validity). Policy-free: child-count ranges are checked,
//!   never enforced.
//! - [`catalog`] — the prototype registry; cloning a registered prototype is
//!   the only instantiation path from outside the editor.
//! - [`tick`] — the single-threaded cooperative traversal producing
//!   {Success, Failure, Running} with resumable partial progress.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod behavior;
pub mod catalog;
pub mod graph;
pub mod tick;

pub use behavior::LeafBehavior;
pub use catalog::{Catalog, COMPOSITE_MAX_CHILDREN};
pub use tick::{TickMetrics, TickOutcome, Ticker};
