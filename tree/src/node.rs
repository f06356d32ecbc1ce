//! Metadata node structure.

use trellis_core::{Attributes, NodeId, TypeIdent, Value};

/// A node in the metadata tree.
///
/// The parent link is a non-owning id used for path reporting; the children
/// list is the owning side and preserves attachment order.
#[derive(Debug, Clone)]
pub struct MetaNode {
    /// Unique identifier for this node.
    pub id: NodeId,
    /// Type of this node (reference into the registry's namespace).
    pub ident: TypeIdent,
    /// The node's name within its parent.
    pub name: String,
    /// Parent back-reference, None while detached.
    pub parent: Option<NodeId>,
    /// Ordered child list.
    pub children: Vec<NodeId>,
    /// Attribute values.
    pub attributes: Attributes,
}

impl MetaNode {
    /// Create a new detached node.
    pub fn new(id: NodeId, ident: TypeIdent, name: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            id,
            ident,
            name: name.into(),
            parent: None,
            children: Vec::new(),
            attributes,
        }
    }

    /// Get an attribute value by name.
    pub fn get_attr(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Set an attribute value, returning the previous one.
    pub fn set_attr(&mut self, name: String, value: Value) -> Option<Value> {
        self.attributes.insert(name, value)
    }

    /// Whether the node is attached to a parent.
    pub fn is_attached(&self) -> bool {
        self.parent.is_some()
    }
}
