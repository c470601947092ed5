//! The three-valued tick outcome.

use std::fmt;

/// Outcome of ticking a node.
///
/// `Running` means "not yet complete; tick me again". On composites it
/// induces resumption: the next tick re-enters at the child that reported
/// `Running` instead of restarting from the first child.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TickStatus {
    /// The node completed and succeeded.
    Success,
    /// The node completed and failed.
    Failure,
    /// The node has not completed; the host should tick again.
    Running,
}

impl TickStatus {
    /// Whether this outcome ends the node's current running phase.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running)
    }
}

impl fmt::Display for TickStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
            Self::Running => write!(f, "running"),
        }
    }
}
