//! Sylva: a visual behavior-tree authoring and execution framework.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Sylva sub-crates. For most users, adding `sylva` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use sylva::prelude::*;
//!
//! // A leaf that reports success immediately.
//! struct Done;
//! impl LeafBehavior for Done {
//!     fn tick(&mut self, _id: NodeId, _node: &mut Node) -> TickStatus {
//!         TickStatus::Success
//!     }
//! }
//!
//! // Register the kinds this project uses.
//! let mut catalog = Catalog::standard();
//! catalog.register("Done", Node::new(NodeKind::leaf("Done"))).unwrap();
//!
//! // Author a tiny tree through the reversible command model.
//! let mut editor = Editor::new(catalog);
//! let mut history = History::new(editor.config().history_limit);
//! let root = editor.place_root("Sequence", Point2::ZERO).unwrap();
//! history
//!     .push(
//!         EditCommand::place_and_connect("Done", Point2::new(0.0, -60.0), root, false),
//!         &mut editor,
//!     )
//!     .unwrap();
//!
//! // Tick it.
//! let mut ticker = Ticker::new();
//! ticker.register_behavior("Done", Box::new(Done));
//! let outcome = ticker.tick(editor.arena_mut(), root).unwrap();
//! assert_eq!(outcome.status, TickStatus::Success);
//!
//! // And take it back.
//! history.undo(&mut editor);
//! assert_eq!(editor.arena().get(root).unwrap().child_count(), 0);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `sylva-core` | Geometry, node data model, ids, tick status, errors |
//! | [`arena`] | `sylva-arena` | Generational node storage and the recycle bin |
//! | [`tree`] | `sylva-tree` | Topology operations, catalog, leaf behaviors, tick engine |
//! | [`editor`] | `sylva-editor` | Editor state, commands, undo/redo history |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types: geometry, ids, the node data model, and errors (`sylva-core`).
pub use sylva_core as types;

/// Generational node storage (`sylva-arena`).
///
/// One [`arena::NodeArena`] backs one editor; the recycle bin is a slot
/// state, not a separate container.
pub use sylva_arena as arena;

/// Topology operations, the prototype catalog, and the tick engine
/// (`sylva-tree`).
///
/// The [`tree::LeafBehavior`] trait is the main extension point for
/// host-defined leaves.
pub use sylva_tree as tree;

/// Editor state, reversible commands, and history (`sylva-editor`).
///
/// [`editor::EditCommand`] variants mutate the tree through
/// [`editor::Editor`] operations; [`editor::History`] owns command
/// lifetime.
pub use sylva_editor as editor;

/// Common imports for typical Sylva usage.
///
/// ```rust
/// use sylva::prelude::*;
/// ```
pub mod prelude {
    // Core data model
    pub use sylva_core::{IntRange, Node, NodeId, NodeKind, Point2, TickStatus};

    // Storage
    pub use sylva_arena::NodeArena;

    // Tree model and ticking
    pub use sylva_tree::{Catalog, LeafBehavior, TickOutcome, Ticker};

    // Editing
    pub use sylva_editor::{EditCommand, Editor, EditorConfig, History};
}
