//! Generational node storage for the Sylva behavior-tree framework.
//!
//! One [`NodeArena`] backs one editor instance. Every node — live or
//! logically deleted — lives in a slot here; the rest of the workspace
//! refers to nodes exclusively through generation-tagged
//! [`NodeId`](sylva_core::NodeId)s, so a purged slot's stale ids are
//! detectable in O(1) without a lookup table.
//!
//! The recycle bin is a slot state, not a separate container: a node is in
//! exactly one of {live, recycled, free} at any time.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod error;

pub use arena::NodeArena;
pub use error::ArenaError;
