//! The [`Editor`]: owner of the live node set, the recycle bin, and the
//! catalog.

use std::error::Error;
use std::fmt;

use sylva_arena::{ArenaError, NodeArena};
use sylva_core::{CatalogError, IntRange, NodeId, Point2, TreeError};
use sylva_tree::{graph, Catalog};

use crate::config::{ConfigError, EditorConfig};

// ── EditError ────────────────────────────────────────────────────

/// Errors from editor operations and command execution.
///
/// Every variant is a caller-facing conflict: a command whose execute
/// returns one of these has not mutated the tree and must not be pushed to
/// the history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditError {
    /// Catalog lookup or registration failed.
    Catalog(CatalogError),
    /// A topology mutation was rejected.
    Tree(TreeError),
    /// An arena state-set operation was rejected.
    Arena(ArenaError),
    /// The editor already has a root; trees have exactly one.
    RootAlreadyExists {
        /// The current root.
        existing: NodeId,
    },
    /// The node cannot be deleted (it is the root, or flagged permanent).
    NotDeletable {
        /// The protected node.
        node: NodeId,
    },
    /// The node cannot be moved (it is the root, or flagged pinned).
    NotMovable {
        /// The pinned node.
        node: NodeId,
    },
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog(e) => write!(f, "catalog: {e}"),
            Self::Tree(e) => write!(f, "tree: {e}"),
            Self::Arena(e) => write!(f, "arena: {e}"),
            Self::RootAlreadyExists { existing } => {
                write!(f, "tree already has a root ({existing})")
            }
            Self::NotDeletable { node } => write!(f, "node {node} cannot be deleted"),
            Self::NotMovable { node } => write!(f, "node {node} cannot be moved"),
        }
    }
}

impl Error for EditError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Catalog(e) => Some(e),
            Self::Tree(e) => Some(e),
            Self::Arena(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CatalogError> for EditError {
    fn from(e: CatalogError) -> Self {
        Self::Catalog(e)
    }
}

impl From<TreeError> for EditError {
    fn from(e: TreeError) -> Self {
        Self::Tree(e)
    }
}

impl From<ArenaError> for EditError {
    fn from(e: ArenaError) -> Self {
        Self::Arena(e)
    }
}

// ── Editor ───────────────────────────────────────────────────────

/// One editing session over one arena.
///
/// Owns every node, live or recycled. Commands hold ids and call back into
/// these operations; nothing else moves nodes between the live set and the
/// recycle bin.
pub struct Editor {
    arena: NodeArena,
    catalog: Catalog,
    config: EditorConfig,
    root: Option<NodeId>,
    selection: Option<NodeId>,
    cursor: Point2,
}

impl Editor {
    /// An editor over `catalog` with the default configuration.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            arena: NodeArena::new(),
            catalog,
            config: EditorConfig::default(),
            root: None,
            selection: None,
            cursor: Point2::ZERO,
        }
    }

    /// An editor with an explicit, validated configuration.
    pub fn with_config(catalog: Catalog, config: EditorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut editor = Self::new(catalog);
        editor.config = config;
        Ok(editor)
    }

    /// The node storage.
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    /// Mutable node storage, for topology operations and ticking.
    pub fn arena_mut(&mut self) -> &mut NodeArena {
        &mut self.arena
    }

    /// The prototype catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The active configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The tree root, once placed.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    // ── Placement and the recycle bin ────────────────────────────

    /// Instantiate `kind` from the catalog at `position` and take ownership.
    pub fn place_node(&mut self, kind: &str, position: Point2) -> Result<NodeId, EditError> {
        let node = self.catalog.instantiate(kind, position)?;
        Ok(self.arena.insert(node))
    }

    /// Place the tree's root: a `kind` instance that is neither deletable
    /// nor movable and accepts exactly one child.
    pub fn place_root(&mut self, kind: &str, position: Point2) -> Result<NodeId, EditError> {
        if let Some(existing) = self.root {
            return Err(EditError::RootAlreadyExists { existing });
        }
        let mut node = self.catalog.instantiate(kind, position)?;
        node.mark_root();
        node.child_range = IntRange::ONE;
        let id = self.arena.insert(node);
        self.root = Some(id);
        Ok(id)
    }

    /// Move a live node into the recycle bin.
    ///
    /// The caller (a delete command) is responsible for topology cleanup:
    /// the node must already be detached from its parent. Its own children
    /// stay attached so an undo restores the identical structure.
    ///
    /// # Panics
    ///
    /// Panics if the node is the root or still has a parent; both are
    /// command-layer bugs, not user conflicts.
    pub fn recycle(&mut self, id: NodeId) -> Result<(), EditError> {
        if let Some(node) = self.arena.get(id) {
            assert!(!node.is_root, "root {id} must never reach the recycle bin");
            assert!(
                node.parent.is_none(),
                "node {id} is still attached; detach before recycling"
            );
        }
        self.arena.recycle(id)?;
        if self.selection == Some(id) {
            self.selection = None;
        }
        Ok(())
    }

    /// Return a node from the recycle bin to the live set.
    pub fn restore(&mut self, id: NodeId) -> Result<(), EditError> {
        self.arena.restore(id)?;
        Ok(())
    }

    /// Permanently destroy a recycled node.
    ///
    /// Only the history calls this, when it drops the last command able to
    /// resurrect the node.
    pub fn purge(&mut self, id: NodeId) -> Result<(), EditError> {
        self.arena.purge(id)?;
        Ok(())
    }

    // ── Cursor and selection ─────────────────────────────────────

    /// The topmost live node whose bounds contain `position`.
    ///
    /// Later placements win ties, matching draw order.
    pub fn node_at(&self, position: Point2) -> Option<NodeId> {
        let mut hit = None;
        for (id, node) in self.arena.iter_live() {
            if node.contains_point(position) {
                hit = Some(id);
            }
        }
        hit
    }

    /// Change the selection. `None` clears it.
    pub fn select(&mut self, id: Option<NodeId>) {
        self.selection = id.filter(|&id| self.arena.is_live(id));
    }

    /// The selected node, if any.
    pub fn selection(&self) -> Option<NodeId> {
        self.selection
    }

    /// Record the latest cursor position in editor space.
    pub fn set_cursor(&mut self, position: Point2) {
        self.cursor = position;
    }

    /// The latest cursor position.
    pub fn cursor(&self) -> Point2 {
        self.cursor
    }

    // ── Validity ─────────────────────────────────────────────────

    /// Whether `id`'s subtree satisfies every child-count range, refreshing
    /// the advisory per-node caches. Rendering cue only.
    pub fn is_setup_valid(&mut self, id: NodeId) -> bool {
        graph::check_setup_validity(&mut self.arena, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sylva_core::NodeKind;
    use sylva_tree::graph::add_child;

    fn catalog_with_leaf() -> Catalog {
        let mut catalog = Catalog::standard();
        catalog
            .register("Wait", sylva_core::Node::new(NodeKind::leaf("Wait")))
            .unwrap();
        catalog
    }

    #[test]
    fn place_node_goes_through_the_catalog() {
        let mut editor = Editor::new(catalog_with_leaf());
        let id = editor.place_node("Wait", Point2::new(3.0, 4.0)).unwrap();
        let node = editor.arena().get(id).unwrap();
        assert_eq!(node.display_name, "Wait");
        assert_eq!(node.position, Point2::new(3.0, 4.0));
    }

    #[test]
    fn unknown_kind_does_not_insert() {
        let mut editor = Editor::new(Catalog::standard());
        assert!(matches!(
            editor.place_node("Nope", Point2::ZERO),
            Err(EditError::Catalog(CatalogError::UnknownKind { .. }))
        ));
        assert_eq!(editor.arena().live_count(), 0);
    }

    #[test]
    fn only_one_root_per_editor() {
        let mut editor = Editor::new(Catalog::standard());
        let root = editor.place_root("Sequence", Point2::ZERO).unwrap();
        assert_eq!(editor.root(), Some(root));
        assert!(!editor.arena().get(root).unwrap().is_deletable());
        assert_eq!(editor.arena().get(root).unwrap().child_range, IntRange::ONE);

        assert_eq!(
            editor.place_root("Fallback", Point2::ZERO),
            Err(EditError::RootAlreadyExists { existing: root })
        );
    }

    #[test]
    fn recycle_clears_selection() {
        let mut editor = Editor::new(catalog_with_leaf());
        let id = editor.place_node("Wait", Point2::ZERO).unwrap();
        editor.select(Some(id));
        assert_eq!(editor.selection(), Some(id));

        editor.recycle(id).unwrap();
        assert_eq!(editor.selection(), None);
    }

    #[test]
    #[should_panic(expected = "still attached")]
    fn recycling_an_attached_node_is_a_bug() {
        let mut editor = Editor::new(catalog_with_leaf());
        let root = editor.place_root("Sequence", Point2::ZERO).unwrap();
        let leaf = editor.place_node("Wait", Point2::ZERO).unwrap();
        add_child(editor.arena_mut(), root, leaf).unwrap();
        let _ = editor.recycle(leaf);
    }

    #[test]
    fn node_at_prefers_the_topmost_hit() {
        let mut editor = Editor::new(catalog_with_leaf());
        let below = editor.place_node("Wait", Point2::ZERO).unwrap();
        let above = editor.place_node("Wait", Point2::ZERO).unwrap();
        assert_eq!(editor.node_at(Point2::ZERO), Some(above));

        editor.recycle(above).unwrap();
        assert_eq!(editor.node_at(Point2::ZERO), Some(below));
    }

    #[test]
    fn setup_validity_tracks_the_subtree() {
        let mut editor = Editor::new(catalog_with_leaf());
        let root = editor.place_root("Sequence", Point2::ZERO).unwrap();
        assert!(!editor.is_setup_valid(root));

        let seq = editor.place_node("Sequence", Point2::new(0.0, -60.0)).unwrap();
        add_child(editor.arena_mut(), root, seq).unwrap();
        assert!(!editor.is_setup_valid(root)); // inner sequence underfilled

        let leaf = editor.place_node("Wait", Point2::new(0.0, -120.0)).unwrap();
        add_child(editor.arena_mut(), seq, leaf).unwrap();
        assert!(editor.is_setup_valid(root));
    }
}
