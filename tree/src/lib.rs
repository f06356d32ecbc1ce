//! Trellis Tree
//!
//! The metadata tree being validated. The tree is owned and driven by the
//! external loading layer; the constraint engine only inspects proposed
//! mutations. Nodes live in flat storage with stable opaque ids, and parent
//! links are non-owning ids, so the parent/child back-references carry no
//! ownership cycles.

mod node;
mod tree;

pub use node::MetaNode;
pub use tree::{Tree, TreeError, TreeResult};
