//! Error types shared across the Sylva workspace, organized by subsystem:
//! tree topology, node catalog, and tick engine.
//!
//! These cover *caller-facing* conflicts only. Invariant violations — a
//! composite holding a dangling child id, undoing a command that never
//! executed — are programming errors and panic with a diagnostic instead of
//! returning a value.

use std::error::Error;
use std::fmt;

use crate::id::NodeId;

/// Errors from tree-topology mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeError {
    /// Connecting `child` under `parent` would make a node its own ancestor.
    CycleWouldForm {
        /// The prospective parent.
        parent: NodeId,
        /// The prospective child.
        child: NodeId,
    },
    /// `child` is already connected under `parent`.
    AlreadyChild {
        /// The parent holding the duplicate.
        parent: NodeId,
        /// The child offered twice.
        child: NodeId,
    },
    /// A node id did not resolve to a live node.
    NotLive {
        /// The id that failed to resolve.
        node: NodeId,
    },
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CycleWouldForm { parent, child } => {
                write!(f, "connecting {child} under {parent} would form a cycle")
            }
            Self::AlreadyChild { parent, child } => {
                write!(f, "{child} is already a child of {parent}")
            }
            Self::NotLive { node } => write!(f, "node {node} is not live"),
        }
    }
}

impl Error for TreeError {}

/// Errors from the node catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogError {
    /// No prototype is registered under the requested kind name.
    UnknownKind {
        /// The name that missed.
        name: String,
    },
    /// A prototype offered for registration has children. Prototypes must be
    /// childless; cloning one is the only instantiation path.
    PrototypeHasChildren {
        /// The offending kind name.
        name: String,
    },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKind { name } => write!(f, "unknown node kind '{name}'"),
            Self::PrototypeHasChildren { name } => {
                write!(f, "prototype '{name}' has children; prototypes must be childless")
            }
        }
    }
}

impl Error for CatalogError {}

/// Errors from the tick engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickError {
    /// The node handed to the ticker does not resolve to a live node.
    NodeNotLive {
        /// The id that failed to resolve.
        node: NodeId,
    },
    /// A leaf's kind name has no registered behavior.
    UnknownLeafBehavior {
        /// The leaf kind that missed the registry.
        name: String,
        /// The leaf node carrying it.
        node: NodeId,
    },
}

impl fmt::Display for TickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeNotLive { node } => write!(f, "cannot tick {node}: not live"),
            Self::UnknownLeafBehavior { name, node } => {
                write!(f, "leaf {node} has kind '{name}' with no registered behavior")
            }
        }
    }
}

impl Error for TickError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_participants() {
        let e = TreeError::CycleWouldForm {
            parent: NodeId::new(1, 1),
            child: NodeId::new(2, 1),
        };
        let msg = e.to_string();
        assert!(msg.contains("1v1"));
        assert!(msg.contains("2v1"));
        assert!(msg.contains("cycle"));
    }

    #[test]
    fn catalog_errors_name_the_kind() {
        let e = CatalogError::UnknownKind {
            name: "Mystery".to_string(),
        };
        assert!(e.to_string().contains("Mystery"));
    }
}
