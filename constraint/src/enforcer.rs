//! The mutation gatekeeper.
//!
//! Every structural mutation of a metadata tree passes through the
//! enforcer: `enforce_on_attach` / `enforce_on_set_value` are the pure
//! checks, `attach` / `set_value` are the committing forms that check
//! first and mutate only on a clean verdict, so a denial never leaves
//! partial state behind.

use crate::{checks, ids, Violation, Violations};
use trellis_core::{NodeId, NodePath, Value};
use trellis_flatten::{Decision, FlattenedIndex};
use trellis_tree::Tree;

/// Constraint enforcer over one registry generation's flattened index.
pub struct Enforcer<'i> {
    index: &'i FlattenedIndex,
}

impl<'i> Enforcer<'i> {
    /// Create a new enforcer.
    pub fn new(index: &'i FlattenedIndex) -> Self {
        Self { index }
    }

    /// Check whether a proposed attachment is legal, without mutating.
    ///
    /// On denial the violation carries the path from the tree root to the
    /// parent, and its message names the rejected child.
    pub fn enforce_on_attach(
        &self,
        tree: &Tree,
        parent: NodeId,
        child: NodeId,
    ) -> Result<(), Violation> {
        let parent_node = tree.get(parent).ok_or_else(|| missing_node(parent))?;
        let child_node = tree.get(child).ok_or_else(|| missing_node(child))?;

        let decision = self
            .index
            .decide(&parent_node.ident, &child_node.ident, &child_node.name);

        let constraint_id = match decision {
            Decision::Accepted { .. } | Decision::ExplicitlyAllowed { .. } => return Ok(()),
            Decision::ExplicitlyForbidden { rule_id } => rule_id,
            Decision::RejectedByParent => ids::PLACEMENT_PARENT.to_string(),
            Decision::RejectedByChild => ids::PLACEMENT_CHILD.to_string(),
            Decision::Undeclared => ids::PLACEMENT_UNDECLARED.to_string(),
        };

        Err(Violation::new(
            constraint_id,
            format!(
                "child {} {:?} is not permitted under {} {:?}",
                child_node.ident, child_node.name, parent_node.ident, parent_node.name
            ),
            tree.path_of(parent),
        ))
    }

    /// Check, then link. The tree is untouched when the check fails.
    pub fn attach(&self, tree: &mut Tree, parent: NodeId, child: NodeId) -> Result<(), Violation> {
        self.enforce_on_attach(tree, parent, child)?;
        tree.attach(parent, child).map_err(|e| {
            Violation::new(ids::TREE_STRUCTURE, e.to_string(), tree.path_of(parent))
        })
    }

    /// Check a proposed attribute assignment, without mutating.
    ///
    /// Evaluates the declared attribute spec and every inherited standalone
    /// check whose selector matches; all failures are collected.
    pub fn enforce_on_set_value(
        &self,
        tree: &Tree,
        node: NodeId,
        attr: &str,
        value: &Value,
    ) -> Result<(), Violations> {
        let mut violations = Violations::new();

        let meta = match tree.get(node) {
            Some(meta) => meta,
            None => {
                violations.push(missing_node(node));
                return Err(violations);
            }
        };
        let path = tree.path_of(node);

        if !self.index.has_type(&meta.ident) {
            violations.push(Violation::new(
                ids::UNKNOWN_TYPE,
                format!("type {} is not registered", meta.ident),
                path,
            ));
            return Err(violations);
        }

        match self.index.attr_of(&meta.ident, attr) {
            Some(flat) => checks::evaluate_spec(flat, attr, value, &path, &mut violations),
            None => violations.push(Violation::new(
                ids::UNKNOWN_ATTR,
                format!(
                    "attribute {:?} is not declared on {} or its ancestors",
                    attr, meta.ident
                ),
                path.clone(),
            )),
        }

        for check in self.index.checks_for(&meta.ident) {
            checks::evaluate_check(check, meta, attr, value, &path, &mut violations);
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    /// Check, then assign. The node is untouched when any check fails.
    pub fn set_value(
        &self,
        tree: &mut Tree,
        node: NodeId,
        attr: &str,
        value: Value,
    ) -> Result<(), Violations> {
        self.enforce_on_set_value(tree, node, attr, &value)?;
        if let Err(e) = tree.set_attr(node, attr, value) {
            let mut violations = Violations::new();
            violations.push(Violation::new(
                ids::TREE_STRUCTURE,
                e.to_string(),
                NodePath::new(),
            ));
            return Err(violations);
        }
        Ok(())
    }
}

fn missing_node(id: NodeId) -> Violation {
    Violation::new(
        ids::MISSING_NODE,
        format!("node {} does not exist", id),
        NodePath::new(),
    )
}
