//! Constraint violation types.

use thiserror::Error;
use trellis_core::NodePath;

/// A constraint violation.
///
/// Carries the violated constraint's id, a human-readable message, and the
/// hierarchical path from the tree root to the offending node.
#[derive(Debug, Clone, Error)]
#[error("{constraint_id}: {message} (at {path})")]
pub struct Violation {
    /// The constraint that was violated.
    pub constraint_id: String,
    /// Human-readable message describing the violation.
    pub message: String,
    /// Path from the tree root to the offender.
    pub path: NodePath,
}

impl Violation {
    /// Create a new violation.
    pub fn new(
        constraint_id: impl Into<String>,
        message: impl Into<String>,
        path: NodePath,
    ) -> Self {
        Self {
            constraint_id: constraint_id.into(),
            message: message.into(),
            path,
        }
    }
}

/// Collection of violations.
///
/// Value enforcement evaluates every applicable check and reports all
/// failures, so diagnostics for a single assignment are complete.
#[derive(Debug, Clone, Default)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    /// Create a new empty violations collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a violation.
    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Check if there are any violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Get all violations.
    pub fn all(&self) -> &[Violation] {
        &self.violations
    }

    /// Get the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Merge another violations collection.
    pub fn merge(&mut self, other: Violations) {
        self.violations.extend(other.violations);
    }

    /// Iterate over the violations.
    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter()
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}
