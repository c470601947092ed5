//! Editor state, reversible commands, and undo/redo history for Sylva
//! behavior trees.
//!
//! The [`Editor`] owns the arena and the catalog; [`EditCommand`]s are value
//! objects carrying node ids and snapshot data, mutating the editor only
//! through its operations; the [`History`] is the sole authority on command
//! lifetime — a node is permanently destroyed only when the last command
//! able to resurrect it is dropped.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod command;
pub mod config;
pub mod editor;
pub mod history;

pub use command::EditCommand;
pub use config::{ConfigError, EditorConfig};
pub use editor::{EditError, Editor};
pub use history::History;
