//! Reusable leaf-behavior fixtures for testing Sylva trees.

#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod fixtures;

pub use fixtures::{AlwaysFail, AlwaysSucceed, LeafScript, ScriptedLeaf, TickLog};
