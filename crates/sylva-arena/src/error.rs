//! Arena-specific error types.

use std::error::Error;
use std::fmt;

use sylva_core::NodeId;

/// Errors that can occur during arena operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The id's generation does not match its slot — the node was purged
    /// (or never existed) and the slot may have been reused since.
    Stale {
        /// The stale id.
        node: NodeId,
    },
    /// The operation requires a live node, but the slot is recycled.
    NotLive {
        /// The id of the recycled node.
        node: NodeId,
    },
    /// The operation requires a recycled node, but the slot is live.
    NotRecycled {
        /// The id of the live node.
        node: NodeId,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stale { node } => write!(f, "stale node id {node}"),
            Self::NotLive { node } => write!(f, "node {node} is not live"),
            Self::NotRecycled { node } => write!(f, "node {node} is not in the recycle bin"),
        }
    }
}

impl Error for ArenaError {}
