//! Stable constraint identifiers carried by violations.
//!
//! These constants keep violation ids consistent between the enforcer and
//! callers that branch on them. Authored rules (explicit placement rules,
//! standalone checks) report their own ids instead.

/// The node's type is absent from the registry.
pub const UNKNOWN_TYPE: &str = "type.unknown";

/// The attribute is not declared on the type or its ancestors.
pub const UNKNOWN_ATTR: &str = "attr.unknown";

/// The value's kind does not match the declared value type.
pub const ATTR_TYPE: &str = "attr.type";

/// A required attribute was assigned null.
pub const ATTR_REQUIRED: &str = "attr.required";

/// The value failed the attribute's match pattern.
pub const ATTR_MATCH: &str = "attr.match";

/// The value fell outside the attribute's declared range.
pub const ATTR_RANGE: &str = "attr.range";

/// The value is not a member of the attribute's allowed set.
pub const ATTR_ONE_OF: &str = "attr.one-of";

/// A referenced node id does not exist in the tree.
pub const MISSING_NODE: &str = "tree.missing-node";

/// A structural tree operation failed (double attach, cycle).
pub const TREE_STRUCTURE: &str = "tree.structure";

/// The parent type declares accepts-children rules and none matched.
pub const PLACEMENT_PARENT: &str = "placement.parent-rejected";

/// The child type declares accepts-parents rules and none matched.
pub const PLACEMENT_CHILD: &str = "placement.child-rejected";

/// No rule anywhere covers the placement: closed-world deny.
pub const PLACEMENT_UNDECLARED: &str = "placement.undeclared";
