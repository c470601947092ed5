//! The node data model: [`NodeKind`] and [`Node`].
//!
//! Nodes are plain data. Topology mutation lives in `sylva-tree::graph`,
//! ticking in `sylva-tree::tick`, and ownership in `sylva-arena`; commands
//! and the editor hold [`NodeId`]s, never nodes.

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::geom::{IntRange, Point2};
use crate::id::NodeId;

/// Default node width in editor units.
pub const NODE_DIM_X: f32 = 100.0;
/// Default node height in editor units.
pub const NODE_DIM_Y: f32 = 50.0;
/// Radius of the top/bottom connection port discs.
pub const PORT_RADIUS: f32 = 2.5;

/// What a node is, and — for composites — where a running phase paused.
///
/// Resumption state lives only on the composite variants: leaves that span
/// ticks manage their own continuation, and the engine asks nothing of them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// AND-semantics composite: fails fast, succeeds when every child does.
    Sequence {
        /// Child index where the last tick returned `Running`, if any.
        last_running_child: Option<usize>,
    },
    /// OR-semantics composite: succeeds fast, fails when every child does.
    Fallback {
        /// Child index where the last tick returned `Running`, if any.
        last_running_child: Option<usize>,
    },
    /// A host-defined leaf, keyed by its registered kind name.
    Leaf(String),
}

impl NodeKind {
    /// A sequence with no pending resumption.
    pub fn sequence() -> Self {
        Self::Sequence {
            last_running_child: None,
        }
    }

    /// A fallback with no pending resumption.
    pub fn fallback() -> Self {
        Self::Fallback {
            last_running_child: None,
        }
    }

    /// A leaf of the given registered kind.
    pub fn leaf(name: impl Into<String>) -> Self {
        Self::Leaf(name.into())
    }

    /// Whether this kind delegates its tick to children.
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Sequence { .. } | Self::Fallback { .. })
    }

    /// The leaf kind name, if this is a leaf.
    pub fn leaf_name(&self) -> Option<&str> {
        match self {
            Self::Leaf(name) => Some(name),
            _ => None,
        }
    }

    /// The saved resumption index, if this is a composite with one.
    pub fn last_running_child(&self) -> Option<usize> {
        match self {
            Self::Sequence { last_running_child } | Self::Fallback { last_running_child } => {
                *last_running_child
            }
            Self::Leaf(_) => None,
        }
    }

    /// Store (or clear) the resumption index on a composite. No-op on leaves.
    pub fn set_last_running_child(&mut self, index: Option<usize>) {
        match self {
            Self::Sequence { last_running_child } | Self::Fallback { last_running_child } => {
                *last_running_child = index;
            }
            Self::Leaf(_) => {}
        }
    }

    /// The kind-derived default display name.
    pub fn default_display_name(&self) -> &str {
        match self {
            Self::Sequence { .. } => "Sequence",
            Self::Fallback { .. } => "Fallback",
            Self::Leaf(name) => name,
        }
    }
}

/// One element of a behavior tree.
///
/// `position` is the node's center in editor space; `dimensions` its full
/// width and height. The parent link is a back-reference only — children
/// order is authoritative and is kept sorted left-to-right by
/// `sylva-tree::graph::reorder_children` so that visual order equals
/// traversal order.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// Name shown in the editor. Kind-derived by default, overridable.
    pub display_name: String,
    /// What the node is, including composite resumption state.
    pub kind: NodeKind,
    /// Whether this node is its tree's root. Roots cannot be deleted or moved.
    pub is_root: bool,
    /// Center position in editor space.
    pub position: Point2,
    /// Current width and height.
    pub dimensions: Point2,
    /// Width and height at creation, before any component resizing.
    pub initial_dimensions: Point2,
    /// How many children this node accepts.
    pub child_range: IntRange,
    /// Back-reference to the owning composite, if attached.
    pub parent: Option<NodeId>,
    /// Ordered children, leftmost first.
    pub children: SmallVec<[NodeId; 4]>,
    /// Kind-enumerated string attributes, round-trippable to the host's
    /// serialization surface. Keys and values are opaque here.
    pub attributes: IndexMap<String, String>,
    /// The child most recently ticked, for flow visualization. Weak by
    /// construction: cleared when that child is detached.
    pub last_ticked_child: Option<NodeId>,
    /// Whether the editor may move this node.
    pub movable: bool,
    /// Whether the editor may delete this node.
    pub deletable: bool,
    /// Cached result of the latest setup-validity check. Advisory only.
    pub setup_valid: bool,
}

impl Node {
    /// Create a node of `kind` with default name, dimensions, and an empty
    /// child range.
    pub fn new(kind: NodeKind) -> Self {
        let display_name = kind.default_display_name().to_string();
        let dimensions = Point2::new(NODE_DIM_X, NODE_DIM_Y);
        Self {
            display_name,
            kind,
            is_root: false,
            position: Point2::ZERO,
            dimensions,
            initial_dimensions: dimensions,
            child_range: IntRange::ZERO,
            parent: None,
            children: SmallVec::new(),
            attributes: IndexMap::new(),
            last_ticked_child: None,
            movable: true,
            deletable: true,
            setup_valid: true,
        }
    }

    /// Builder-style child range override.
    pub fn with_child_range(mut self, range: IntRange) -> Self {
        self.child_range = range;
        self
    }

    /// Builder-style dimension override.
    pub fn with_dimensions(mut self, dimensions: Point2) -> Self {
        self.dimensions = dimensions;
        self.initial_dimensions = dimensions;
        self
    }

    /// Promote this node to tree root: not movable, not deletable.
    pub fn mark_root(&mut self) {
        self.is_root = true;
        self.movable = false;
        self.deletable = false;
    }

    /// Whether the editor may delete this node.
    pub fn is_deletable(&self) -> bool {
        self.deletable && !self.is_root
    }

    /// Whether the editor may move this node.
    pub fn is_movable(&self) -> bool {
        self.movable && !self.is_root
    }

    /// Number of attached children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Whether `candidate` is a direct child.
    pub fn is_child(&self, candidate: NodeId) -> bool {
        self.children.contains(&candidate)
    }

    /// Lower-left and upper-right corners of the node's bounds.
    pub fn bounds(&self) -> (Point2, Point2) {
        let half = self.dimensions.scaled(0.5);
        (self.position - half, self.position + half)
    }

    /// Whether an editor-space point lies inside the node's bounds.
    pub fn contains_point(&self, p: Point2) -> bool {
        let (min, max) = self.bounds();
        p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
    }

    /// Center and radius of the top connection port disc.
    pub fn top_port(&self) -> (Point2, f32) {
        let center = Point2::new(self.position.x, self.position.y + self.dimensions.y * 0.5);
        (center, PORT_RADIUS)
    }

    /// Center and radius of the bottom connection port disc.
    pub fn bottom_port(&self) -> (Point2, f32) {
        let center = Point2::new(self.position.x, self.position.y - self.dimensions.y * 0.5);
        (center, PORT_RADIUS)
    }

    /// Look up one attribute.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Insert or replace one attribute.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Restore attributes from a deserialized map.
    ///
    /// Every key present in `source` is taken, so a map this node previously
    /// emitted round-trips exactly; keys this kind does not know are
    /// preserved alongside.
    pub fn merge_attributes(&mut self, source: &IndexMap<String, String>) {
        for (key, value) in source {
            self.attributes.insert(key.clone(), value.clone());
        }
    }

    /// Clear all per-tick bookkeeping: the flow indicator and any composite
    /// resumption index.
    pub fn reset_tick_state(&mut self) {
        self.last_ticked_child = None;
        self.kind.set_last_running_child(None);
    }
}
