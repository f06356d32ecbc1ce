//! Hierarchical node paths for violation reporting.
//!
//! A path names every node from the tree root down to the offender, each
//! segment carrying the node's name and type identifier. Violations embed
//! a path so callers can locate the offending node without holding a
//! reference into the tree.

use crate::TypeIdent;
use std::fmt;

/// One step of a node path: the node's name and its type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    /// The node's name within its parent.
    pub name: String,
    /// The node's type identifier.
    pub ident: TypeIdent,
}

impl PathSegment {
    /// Create a segment.
    pub fn new(name: impl Into<String>, ident: TypeIdent) -> Self {
        Self {
            name: name.into(),
            ident,
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.name, self.ident)
    }
}

/// An ordered path from the tree root to a node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePath {
    segments: Vec<PathSegment>,
}

impl NodePath {
    /// Create an empty path (the tree root).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment at the deep end of the path.
    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    /// The segments root-first.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// The deepest segment, if any.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl FromIterator<PathSegment> for NodePath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "/");
        }
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}
