//! The flattened rule index.
//!
//! One build pass converts the registry's per-type inherited declarations
//! into directly queryable tables, so placement queries never walk the
//! hierarchy. Wildcards inside rules are evaluated lazily against concrete
//! query arguments rather than being expanded per type pair.

use crate::{Decision, RuleMatch, Specificity};
use std::collections::HashMap;
use trellis_core::TypeIdent;
use trellis_registry::{
    AttrSpec, CheckDef, ChildRule, ExplicitRule, ParentRule, Registry, Verdict,
};

/// An attribute spec resolved through inheritance, owned by the index.
#[derive(Debug, Clone)]
pub struct FlatAttr {
    pub spec: AttrSpec,
    pub required: bool,
}

/// One side's contribution to a placement verdict.
enum SideVote {
    /// The side declares no rules and stays out of the verdict.
    Abstain,
    /// At least one rule matched; carries the most specific match.
    Allow(RuleMatch),
    /// The side declares rules but none matched.
    Deny,
}

/// Inheritance-resolved rule index, answerable in constant time.
///
/// Built once per registry generation; queries never trigger a rebuild, so
/// lookup cost is independent of hierarchy depth.
#[derive(Debug)]
pub struct FlattenedIndex {
    /// Effective accepts-children rules per parent type, nearest first,
    /// each paired with the declaring type.
    child_tables: HashMap<TypeIdent, Vec<(TypeIdent, ChildRule)>>,
    /// Effective accepts-parents rules per child type, nearest first.
    parent_tables: HashMap<TypeIdent, Vec<(TypeIdent, ParentRule)>>,
    /// Effective standalone checks per type.
    check_tables: HashMap<TypeIdent, Vec<CheckDef>>,
    /// Effective attributes per type.
    attr_tables: HashMap<TypeIdent, HashMap<String, FlatAttr>>,
    /// Explicit rules in authoring order.
    explicit: Vec<ExplicitRule>,
    /// Reverse lookups derived in the build pass, sorted by identifier.
    valid_children: HashMap<TypeIdent, Vec<TypeIdent>>,
    valid_parents: HashMap<TypeIdent, Vec<TypeIdent>>,
}

impl FlattenedIndex {
    /// Build the index from a sealed registry.
    pub fn build(registry: &Registry) -> Self {
        let mut child_tables = HashMap::new();
        let mut parent_tables = HashMap::new();
        let mut check_tables = HashMap::new();
        let mut attr_tables = HashMap::new();

        for ident in registry.all() {
            child_tables.insert(
                ident.clone(),
                registry
                    .effective_child_rules(ident)
                    .into_iter()
                    .map(|(owner, rule)| (owner.clone(), rule.clone()))
                    .collect(),
            );
            parent_tables.insert(
                ident.clone(),
                registry
                    .effective_parent_rules(ident)
                    .into_iter()
                    .map(|(owner, rule)| (owner.clone(), rule.clone()))
                    .collect(),
            );
            check_tables.insert(
                ident.clone(),
                registry
                    .effective_checks(ident)
                    .into_iter()
                    .cloned()
                    .collect(),
            );
            attr_tables.insert(
                ident.clone(),
                registry
                    .effective_attrs(ident)
                    .into_iter()
                    .map(|resolved| {
                        (
                            resolved.spec.name.clone(),
                            FlatAttr {
                                spec: resolved.spec.clone(),
                                required: resolved.required,
                            },
                        )
                    })
                    .collect(),
            );
        }

        let mut index = Self {
            child_tables,
            parent_tables,
            check_tables,
            attr_tables,
            explicit: registry.explicit_rules().to_vec(),
            valid_children: HashMap::new(),
            valid_parents: HashMap::new(),
        };

        // Reverse pair tables, derived from the same pass. Registry
        // iteration is sorted, so the result vectors are too.
        let idents: Vec<TypeIdent> = registry.all().cloned().collect();
        for parent in &idents {
            for child in &idents {
                if index.decide_inner(parent, child, None).is_allowed() {
                    index
                        .valid_children
                        .entry(parent.clone())
                        .or_default()
                        .push(child.clone());
                    index
                        .valid_parents
                        .entry(child.clone())
                        .or_default()
                        .push(parent.clone());
                }
            }
        }

        index
    }

    /// Whether the type is part of the indexed registry generation.
    pub fn has_type(&self, ident: &TypeIdent) -> bool {
        self.attr_tables.contains_key(ident)
    }

    /// Decide a concrete placement.
    pub fn decide(&self, parent: &TypeIdent, child: &TypeIdent, child_name: &str) -> Decision {
        self.decide_inner(parent, child, Some(child_name))
    }

    /// Hot-path boolean form of `decide`.
    pub fn is_allowed(&self, parent: &TypeIdent, child: &TypeIdent, child_name: &str) -> bool {
        self.decide(parent, child, child_name).is_allowed()
    }

    /// Child types placeable under the given parent type (name-agnostic).
    pub fn valid_child_types(&self, parent: &TypeIdent) -> &[TypeIdent] {
        self.valid_children
            .get(parent)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Parent types the given child type may appear under (name-agnostic).
    pub fn valid_parent_types(&self, child: &TypeIdent) -> &[TypeIdent] {
        self.valid_parents
            .get(child)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Effective standalone checks for a type.
    pub fn checks_for(&self, ident: &TypeIdent) -> &[CheckDef] {
        self.check_tables
            .get(ident)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Effective attribute spec for a type, by attribute name.
    pub fn attr_of(&self, ident: &TypeIdent, name: &str) -> Option<&FlatAttr> {
        self.attr_tables.get(ident)?.get(name)
    }

    // ==================== Verdict assembly ====================

    /// Decide with an optional name: None means "for some name", used by
    /// the reverse pair tables. With None, only a name-wildcard Forbid can
    /// rule a pair out wholesale.
    fn decide_inner(
        &self,
        parent: &TypeIdent,
        child: &TypeIdent,
        child_name: Option<&str>,
    ) -> Decision {
        // Explicit forbids override every other source, regardless of
        // authoring order.
        for rule in &self.explicit {
            if rule.verdict != Verdict::Forbid {
                continue;
            }
            let name_hit = match child_name {
                Some(name) => rule.child_name.matches(name),
                None => rule.child_name.is_any(),
            };
            if name_hit && rule.parent.matches(parent) && rule.child.matches(child) {
                return Decision::ExplicitlyForbidden {
                    rule_id: rule.id.clone(),
                };
            }
        }

        let parent_vote = self.parent_side(parent, child, child_name);
        let child_vote = self.child_side(parent, child, child_name);

        let denial = match (parent_vote, child_vote) {
            (SideVote::Deny, _) => Decision::RejectedByParent,
            (_, SideVote::Deny) => Decision::RejectedByChild,
            (SideVote::Abstain, SideVote::Abstain) => Decision::Undeclared,
            (parent_vote, child_vote) => {
                return Decision::Accepted {
                    parent_grant: parent_vote.into_grant(),
                    child_grant: child_vote.into_grant(),
                }
            }
        };

        // The hierarchy denied; an explicit Allow is still a grant source.
        for rule in &self.explicit {
            if rule.verdict != Verdict::Allow {
                continue;
            }
            let name_hit = match child_name {
                Some(name) => rule.child_name.matches(name),
                None => true,
            };
            if name_hit && rule.parent.matches(parent) && rule.child.matches(child) {
                return Decision::ExplicitlyAllowed {
                    rule_id: rule.id.clone(),
                };
            }
        }

        denial
    }

    /// The parent side's vote: its effective accepts-children rules against
    /// the proposed child.
    fn parent_side(
        &self,
        parent: &TypeIdent,
        child: &TypeIdent,
        child_name: Option<&str>,
    ) -> SideVote {
        let rules = match self.child_tables.get(parent) {
            Some(rules) if !rules.is_empty() => rules,
            _ => return SideVote::Abstain,
        };

        let mut best: Option<RuleMatch> = None;
        for (owner, rule) in rules {
            let name_hit = match child_name {
                Some(name) => rule.name.matches(name),
                None => true,
            };
            if name_hit
                && rule.category.matches(child.category())
                && rule.variant.matches(child.variant())
            {
                let specificity = Specificity::of(&rule.category, &rule.variant, &rule.name);
                // Strict > keeps the first (nearest-declared) rule on ties.
                if best
                    .as_ref()
                    .map_or(true, |held| specificity > held.specificity)
                {
                    best = Some(RuleMatch {
                        declared_by: owner.clone(),
                        specificity,
                    });
                }
            }
        }

        match best {
            Some(rule_match) => SideVote::Allow(rule_match),
            None => SideVote::Deny,
        }
    }

    /// The child side's vote: its effective accepts-parents rules against
    /// the proposed parent and the name it would carry.
    fn child_side(
        &self,
        parent: &TypeIdent,
        child: &TypeIdent,
        child_name: Option<&str>,
    ) -> SideVote {
        let rules = match self.parent_tables.get(child) {
            Some(rules) if !rules.is_empty() => rules,
            _ => return SideVote::Abstain,
        };

        let mut best: Option<RuleMatch> = None;
        for (owner, rule) in rules {
            let name_hit = match child_name {
                Some(name) => rule.child_name.matches(name),
                None => true,
            };
            if name_hit
                && rule.category.matches(parent.category())
                && rule.variant.matches(parent.variant())
            {
                let specificity =
                    Specificity::of(&rule.category, &rule.variant, &rule.child_name);
                if best
                    .as_ref()
                    .map_or(true, |held| specificity > held.specificity)
                {
                    best = Some(RuleMatch {
                        declared_by: owner.clone(),
                        specificity,
                    });
                }
            }
        }

        match best {
            Some(rule_match) => SideVote::Allow(rule_match),
            None => SideVote::Deny,
        }
    }
}

impl SideVote {
    fn into_grant(self) -> Option<RuleMatch> {
        match self {
            SideVote::Allow(rule_match) => Some(rule_match),
            SideVote::Abstain | SideVote::Deny => None,
        }
    }
}
