//! RegistryBuilder for constructing a sealed Registry.
//!
//! Registration order is arbitrary: a definition may name a parent that has
//! not been registered yet. Parent references are resolved in a second pass
//! when `seal` runs, so providers never need to coordinate ordering.

use crate::{ExplicitRule, Registry, TypeDef};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;
use trellis_core::{PatternError, TypeIdent};

/// Errors that can occur while assembling or sealing the registry.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Duplicate type: {0}")]
    DuplicateType(TypeIdent),

    #[error("Unknown parent type {parent} declared by {ident}")]
    UnknownParent { ident: TypeIdent, parent: TypeIdent },

    #[error("Inheritance cycle detected involving type: {0}")]
    InheritanceCycle(TypeIdent),

    #[error("Malformed type definition {ident}: {reason}")]
    MalformedType { ident: TypeIdent, reason: String },

    #[error("Malformed attribute {attr:?} on {ident}: {reason}")]
    MalformedAttribute {
        ident: TypeIdent,
        attr: String,
        reason: String,
    },

    #[error("Duplicate explicit constraint: {0}")]
    DuplicateExplicit(String),

    #[error("Registry is sealed; stage definitions in a provider and reload")]
    Sealed,

    #[error(transparent)]
    Pattern(#[from] PatternError),
}

/// Result type for registry configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Builder for a sealed, immutable Registry.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    /// Definitions keyed by identifier; BTreeMap keeps iteration
    /// deterministic.
    types: BTreeMap<TypeIdent, TypeDef>,
    /// Explicit placement rules in authoring order.
    explicit: Vec<ExplicitRule>,
}

impl RegistryBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type definition.
    ///
    /// Duplicate identifiers and malformed specs are rejected immediately;
    /// the parent reference is validated later, at seal.
    pub fn register(&mut self, def: TypeDef) -> ConfigResult<()> {
        validate_definition(&def)?;
        if self.types.contains_key(&def.ident) {
            return Err(ConfigError::DuplicateType(def.ident));
        }
        self.types.insert(def.ident.clone(), def);
        Ok(())
    }

    /// Add an explicit placement rule.
    pub fn add_explicit(&mut self, rule: ExplicitRule) -> ConfigResult<()> {
        if self.explicit.iter().any(|existing| existing.id == rule.id) {
            return Err(ConfigError::DuplicateExplicit(rule.id));
        }
        self.explicit.push(rule);
        Ok(())
    }

    /// Whether an identifier has been registered so far.
    pub fn is_registered(&self, ident: &TypeIdent) -> bool {
        self.types.contains_key(ident)
    }

    /// Number of registered definitions.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether nothing has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Seal the builder into an immutable Registry.
    ///
    /// This is the one-way mutable-to-frozen transition: the second
    /// resolution pass runs here (unknown parents, inheritance cycles), and
    /// on any error the registry never becomes queryable.
    pub fn seal(self) -> ConfigResult<Registry> {
        // Second pass: every declared parent must resolve.
        for def in self.types.values() {
            if let Some(parent) = &def.parent {
                if !self.types.contains_key(parent) {
                    return Err(ConfigError::UnknownParent {
                        ident: def.ident.clone(),
                        parent: parent.clone(),
                    });
                }
            }
        }

        // Parent chains must be finite and acyclic.
        for start in self.types.keys() {
            let mut seen: HashSet<&TypeIdent> = HashSet::new();
            let mut cursor = Some(start);
            while let Some(ident) = cursor {
                if !seen.insert(ident) {
                    return Err(ConfigError::InheritanceCycle(start.clone()));
                }
                cursor = self.types.get(ident).and_then(|def| def.parent.as_ref());
            }
        }

        Ok(Registry::new(self.types, self.explicit))
    }
}

/// Reject definitions that could never be queried coherently.
fn validate_definition(def: &TypeDef) -> ConfigResult<()> {
    if def.ident.category().is_empty() || def.ident.variant().is_empty() {
        return Err(ConfigError::MalformedType {
            ident: def.ident.clone(),
            reason: "category and variant must be non-empty".to_string(),
        });
    }
    for spec in def.attributes.values() {
        if spec.name.is_empty() {
            return Err(ConfigError::MalformedAttribute {
                ident: def.ident.clone(),
                attr: spec.name.clone(),
                reason: "attribute name must be non-empty".to_string(),
            });
        }
        if spec.value_type.is_empty() {
            return Err(ConfigError::MalformedAttribute {
                ident: def.ident.clone(),
                attr: spec.name.clone(),
                reason: "value type must be non-empty".to_string(),
            });
        }
    }
    for check in &def.checks {
        if check.id.is_empty() {
            return Err(ConfigError::MalformedType {
                ident: def.ident.clone(),
                reason: "check identifiers must be non-empty".to_string(),
            });
        }
    }
    Ok(())
}
