//! Placement decisions.
//!
//! A decision records the verdict and enough diagnostics to explain it:
//! which rule granted (and where in the hierarchy it was declared), or why
//! the placement was denied.

use crate::Specificity;
use trellis_core::TypeIdent;

/// A matched placement rule: which type declared it (possibly an ancestor
/// of the queried type) and how specific the match was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    /// The type whose declaration matched.
    pub declared_by: TypeIdent,
    /// Specificity of the winning match.
    pub specificity: Specificity,
}

/// The outcome of a placement query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Denied by a matching explicit Forbid rule. Overrides every grant.
    ExplicitlyForbidden { rule_id: String },
    /// Granted by a matching explicit Allow rule after the declared
    /// hierarchy did not grant.
    ExplicitlyAllowed { rule_id: String },
    /// Granted by the declared hierarchy. A side that declared nothing
    /// abstained and contributes no grant.
    Accepted {
        parent_grant: Option<RuleMatch>,
        child_grant: Option<RuleMatch>,
    },
    /// The parent type declares accepts-children rules, but none match.
    RejectedByParent,
    /// The child type declares accepts-parents rules, but none match.
    RejectedByChild,
    /// Neither side declares anything for this placement: closed world.
    Undeclared,
}

impl Decision {
    /// Whether the placement may proceed.
    pub fn is_allowed(&self) -> bool {
        matches!(
            self,
            Decision::ExplicitlyAllowed { .. } | Decision::Accepted { .. }
        )
    }
}
