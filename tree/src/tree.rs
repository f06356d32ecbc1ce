//! In-memory metadata tree storage.
//!
//! The tree is owned by the loading layer, not by the constraint engine:
//! nodes are created detached and linked by raw `attach`. Enforcement
//! happens in front of these operations (see trellis-constraint), so the
//! operations here check structure only.

use crate::MetaNode;
use std::collections::HashMap;
use thiserror::Error;
use trellis_core::{Attributes, NodeId, NodePath, PathSegment, TypeIdent, Value};

/// Errors for structural tree operations.
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Node {0} is already attached to a parent")]
    AlreadyAttached(NodeId),

    #[error("Attaching {child} under {parent} would create a cycle")]
    WouldCycle { parent: NodeId, child: NodeId },
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;

/// ID allocator for nodes.
#[derive(Debug)]
struct IdAllocator {
    next_node_id: u64,
}

impl IdAllocator {
    fn new() -> Self {
        Self { next_node_id: 1 }
    }

    fn alloc(&mut self) -> NodeId {
        let id = NodeId::new(self.next_node_id);
        self.next_node_id += 1;
        id
    }
}

/// The in-memory metadata tree.
#[derive(Debug)]
pub struct Tree {
    /// Node storage
    nodes: HashMap<NodeId, MetaNode>,
    /// ID allocator
    id_alloc: IdAllocator,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            id_alloc: IdAllocator::new(),
        }
    }

    /// Create a new detached node.
    pub fn create_node(
        &mut self,
        ident: TypeIdent,
        name: impl Into<String>,
        attributes: Attributes,
    ) -> NodeId {
        let id = self.id_alloc.alloc();
        let node = MetaNode::new(id, ident, name, attributes);
        self.nodes.insert(id, node);
        id
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&MetaNode> {
        self.nodes.get(&id)
    }

    /// Get a mutable reference to a node by ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut MetaNode> {
        self.nodes.get_mut(&id)
    }

    /// Link a child under a parent.
    ///
    /// Structural checks only; every check runs before any state changes,
    /// so a failed attach leaves the tree untouched.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        if !self.nodes.contains_key(&parent) {
            return Err(TreeError::NodeNotFound(parent));
        }
        let child_node = self
            .nodes
            .get(&child)
            .ok_or(TreeError::NodeNotFound(child))?;
        if child_node.parent.is_some() {
            return Err(TreeError::AlreadyAttached(child));
        }
        // The parent must not sit inside the child's subtree.
        if parent == child || self.is_ancestor(child, parent) {
            return Err(TreeError::WouldCycle { parent, child });
        }

        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
        Ok(())
    }

    /// Unlink a child from its parent.
    pub fn detach(&mut self, child: NodeId) -> TreeResult<()> {
        let parent = match self.nodes.get(&child) {
            Some(node) => node.parent,
            None => return Err(TreeError::NodeNotFound(child)),
        };
        if let Some(parent) = parent {
            if let Some(parent_node) = self.nodes.get_mut(&parent) {
                parent_node.children.retain(|&id| id != child);
            }
            if let Some(child_node) = self.nodes.get_mut(&child) {
                child_node.parent = None;
            }
        }
        Ok(())
    }

    /// Set an attribute value on a node, returning the previous value.
    pub fn set_attr(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        value: Value,
    ) -> TreeResult<Option<Value>> {
        let node = self.nodes.get_mut(&id).ok_or(TreeError::NodeNotFound(id))?;
        Ok(node.set_attr(name.into(), value))
    }

    /// The ordered children of a node (empty for unknown ids).
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(&id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The path from the tree root down to the given node.
    ///
    /// Unknown ids yield the empty (root) path.
    pub fn path_of(&self, id: NodeId) -> NodePath {
        let mut segments = Vec::new();
        let mut cursor = self.nodes.get(&id);
        while let Some(node) = cursor {
            segments.push(PathSegment::new(node.name.clone(), node.ident.clone()));
            cursor = node.parent.and_then(|parent| self.nodes.get(&parent));
        }
        segments.reverse();
        segments.into_iter().collect()
    }

    /// Whether `ancestor` lies on the parent chain of `node`.
    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = self.nodes.get(&node).and_then(|n| n.parent);
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            cursor = self.nodes.get(&id).and_then(|n| n.parent);
        }
        false
    }
}
