//! The Registry - immutable schema lookup and inheritance resolution.

use crate::{AttrSpec, CheckDef, ChildRule, ExplicitRule, ParentRule, TypeDef};
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap, HashSet};
use trellis_core::TypeIdent;

/// An attribute as seen through inheritance: the nearest declaration
/// supplies the spec body, while `required` accumulates across the chain
/// (a descendant can tighten a requirement, never relax one).
#[derive(Debug, Clone, Copy)]
pub struct ResolvedAttr<'a> {
    pub spec: &'a AttrSpec,
    pub required: bool,
}

/// The Registry provides runtime lookup of type definitions.
/// It is immutable after sealing.
#[derive(Debug)]
pub struct Registry {
    /// Definitions keyed by identifier, deterministically ordered.
    types: BTreeMap<TypeIdent, TypeDef>,
    /// Explicit placement rules in authoring order.
    explicit: Vec<ExplicitRule>,
}

impl Registry {
    /// Construct a registry (use RegistryBuilder::seal).
    pub(crate) fn new(types: BTreeMap<TypeIdent, TypeDef>, explicit: Vec<ExplicitRule>) -> Self {
        Self { types, explicit }
    }

    // ==================== Lookups ====================

    /// Get a type definition by identifier.
    pub fn get(&self, ident: &TypeIdent) -> Option<&TypeDef> {
        self.types.get(ident)
    }

    /// Whether an identifier is registered.
    pub fn contains(&self, ident: &TypeIdent) -> bool {
        self.types.contains_key(ident)
    }

    /// All registered identifiers, in identifier order.
    pub fn all(&self) -> impl Iterator<Item = &TypeIdent> {
        self.types.keys()
    }

    /// All definitions, in identifier order.
    pub fn definitions(&self) -> impl Iterator<Item = &TypeDef> {
        self.types.values()
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// The explicit placement rules.
    pub fn explicit_rules(&self) -> &[ExplicitRule] {
        &self.explicit
    }

    // ==================== Inheritance resolution ====================

    /// The definition chain from the type itself up to its root ancestor.
    ///
    /// Finite and cycle-free by the seal-time invariant. Unknown
    /// identifiers yield an empty chain.
    pub fn ancestors_of(&self, ident: &TypeIdent) -> Vec<&TypeDef> {
        let mut chain = Vec::new();
        let mut cursor = self.types.get(ident);
        while let Some(def) = cursor {
            chain.push(def);
            cursor = def.parent.as_ref().and_then(|parent| self.types.get(parent));
        }
        chain
    }

    /// The identifier chain from the type itself up to its root ancestor.
    pub fn ancestor_idents(&self, ident: &TypeIdent) -> Vec<TypeIdent> {
        self.ancestors_of(ident)
            .into_iter()
            .map(|def| def.ident.clone())
            .collect()
    }

    /// Effective accepts-children declarations: the type's own plus every
    /// ancestor's, nearest first, each paired with the declaring type.
    pub fn effective_child_rules(&self, ident: &TypeIdent) -> Vec<(&TypeIdent, &ChildRule)> {
        self.ancestors_of(ident)
            .into_iter()
            .flat_map(|def| def.child_rules.iter().map(move |rule| (&def.ident, rule)))
            .collect()
    }

    /// Effective accepts-parents declarations, nearest first.
    pub fn effective_parent_rules(&self, ident: &TypeIdent) -> Vec<(&TypeIdent, &ParentRule)> {
        self.ancestors_of(ident)
            .into_iter()
            .flat_map(|def| def.parent_rules.iter().map(move |rule| (&def.ident, rule)))
            .collect()
    }

    /// Effective standalone checks, nearest first, deduplicated by id
    /// (the nearest declaration wins).
    pub fn effective_checks(&self, ident: &TypeIdent) -> Vec<&CheckDef> {
        let mut seen = HashSet::new();
        let mut checks = Vec::new();
        for def in self.ancestors_of(ident) {
            for check in &def.checks {
                if seen.insert(check.id.as_str()) {
                    checks.push(check);
                }
            }
        }
        checks
    }

    /// Resolve one attribute through the inheritance chain.
    pub fn effective_attr(&self, ident: &TypeIdent, name: &str) -> Option<ResolvedAttr<'_>> {
        let mut spec = None;
        let mut required = false;
        for def in self.ancestors_of(ident) {
            if let Some(attr) = def.get_attr(name) {
                required |= attr.required;
                if spec.is_none() {
                    spec = Some(attr);
                }
            }
        }
        spec.map(|spec| ResolvedAttr { spec, required })
    }

    /// All attributes effective for a type, nearest declaration first.
    pub fn effective_attrs(&self, ident: &TypeIdent) -> Vec<ResolvedAttr<'_>> {
        let mut specs: Vec<&AttrSpec> = Vec::new();
        let mut required: HashMap<&str, bool> = HashMap::new();

        for def in self.ancestors_of(ident) {
            for (name, attr) in &def.attributes {
                match required.entry(name.as_str()) {
                    Entry::Occupied(mut entry) => *entry.get_mut() |= attr.required,
                    Entry::Vacant(entry) => {
                        entry.insert(attr.required);
                        specs.push(attr);
                    }
                }
            }
        }

        specs
            .into_iter()
            .map(|spec| ResolvedAttr {
                spec,
                required: required[spec.name.as_str()],
            })
            .collect()
    }
}
