//! Symbol tree for the legacy `_T` mangling decoder.
//!
//! A decoded symbol is a tree of nodes, each with a [`NodeKind`], an
//! optional [`Payload`] and an ordered child list. Nodes live in a
//! [`NodeArena`] and are addressed by [`NodeId`]; parents and the decoder's
//! substitution table hold copies of child IDs, never ownership.
//!
//! The finished tree is handed out as a [`SymbolTree`], which owns its
//! arena and can be compared structurally or dumped for diagnostics.

mod arena;
mod kind;
mod specialization;
mod tree;
mod witness;

pub use arena::{NodeArena, NodeId, Payload};
pub use kind::NodeKind;
pub use specialization::{SpecializationParamFlags, SpecializationParamKind};
pub use tree::{SymbolTree, DUMP_EXPANSION_LIMIT};
pub use witness::{Directness, ValueWitnessKind};
