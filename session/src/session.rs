//! Session manager.
//!
//! The facade collaborators talk to: bootstrap runs the providers into one
//! sealed generation, reads delegate to the current snapshot, and reload
//! swaps in a freshly built generation atomically. In-flight readers hold
//! their snapshot Arc and finish against consistent (old) data.

use std::sync::{Arc, RwLock};
use trellis_constraint::{Violation, Violations};
use trellis_core::{NodeId, TypeIdent, Value};
use trellis_flatten::Decision;
use trellis_registry::{
    ConfigError, ConfigResult, ExplicitRule, RegistryBuilder, TypeDef,
};
use trellis_tree::Tree;

use crate::error::{SessionError, SessionResult};
use crate::generation::Generation;
use crate::provider::SchemaProvider;

/// A constraint-engine session over reloadable registry generations.
pub struct Session {
    /// Providers replayed on every (re)build.
    providers: Vec<Box<dyn SchemaProvider>>,
    /// The current generation snapshot.
    current: RwLock<Arc<Generation>>,
}

impl Session {
    /// Run every provider into one builder, seal, and open the session.
    ///
    /// A failed seal means no session: the registry never becomes
    /// queryable with an unresolved configuration error.
    pub fn bootstrap(providers: Vec<Box<dyn SchemaProvider>>) -> ConfigResult<Self> {
        let generation = build_generation(&providers, 1)?;
        Ok(Self {
            providers,
            current: RwLock::new(Arc::new(generation)),
        })
    }

    /// The current generation snapshot.
    ///
    /// The returned Arc stays consistent even if a reload swaps the
    /// session's current generation afterwards.
    pub fn snapshot(&self) -> Arc<Generation> {
        read_lock(&self.current).clone()
    }

    /// The current generation number.
    pub fn generation(&self) -> u64 {
        self.snapshot().number()
    }

    /// Rebuild from the providers and swap the generation atomically.
    ///
    /// On error the current generation stays in place.
    pub fn reload(&self) -> ConfigResult<u64> {
        let next_number = self.snapshot().number() + 1;
        let generation = Arc::new(build_generation(&self.providers, next_number)?);
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = generation;
        Ok(next_number)
    }

    // ==================== Sealed-phase guards ====================

    /// Direct registration against a sealed session always fails; stage
    /// definitions in a provider and reload instead.
    pub fn register_type(&self, _def: TypeDef) -> SessionResult<()> {
        Err(ConfigError::Sealed.into())
    }

    /// Direct explicit-rule authoring against a sealed session always
    /// fails; stage the rule in a provider and reload instead.
    pub fn add_explicit_constraint(&self, _rule: ExplicitRule) -> SessionResult<()> {
        Err(ConfigError::Sealed.into())
    }

    // ==================== Lookups ====================

    /// Get a type definition from the current generation.
    pub fn type_definition(&self, ident: &TypeIdent) -> SessionResult<TypeDef> {
        let snapshot = self.snapshot();
        snapshot
            .registry()
            .get(ident)
            .cloned()
            .ok_or_else(|| SessionError::UnknownType(ident.clone()))
    }

    /// The identifier chain from the type up to its root ancestor.
    pub fn ancestors_of(&self, ident: &TypeIdent) -> SessionResult<Vec<TypeIdent>> {
        let snapshot = self.snapshot();
        if !snapshot.registry().contains(ident) {
            return Err(SessionError::UnknownType(ident.clone()));
        }
        Ok(snapshot.registry().ancestor_idents(ident))
    }

    /// All registered identifiers, in identifier order.
    pub fn all_types(&self) -> Vec<TypeIdent> {
        self.snapshot().registry().all().cloned().collect()
    }

    // ==================== Placement queries ====================

    /// Whether a placement is legal under the current generation.
    pub fn is_placement_allowed(
        &self,
        parent: &TypeIdent,
        child: &TypeIdent,
        child_name: &str,
    ) -> bool {
        self.snapshot().index().is_allowed(parent, child, child_name)
    }

    /// The full placement decision, with diagnostics.
    pub fn decide_placement(
        &self,
        parent: &TypeIdent,
        child: &TypeIdent,
        child_name: &str,
    ) -> Decision {
        self.snapshot().index().decide(parent, child, child_name)
    }

    /// Child types placeable under the given parent type.
    pub fn valid_child_types(&self, parent: &TypeIdent) -> SessionResult<Vec<TypeIdent>> {
        let snapshot = self.snapshot();
        if !snapshot.registry().contains(parent) {
            return Err(SessionError::UnknownType(parent.clone()));
        }
        Ok(snapshot.index().valid_child_types(parent).to_vec())
    }

    /// Parent types the given child type may appear under.
    pub fn valid_parent_types(&self, child: &TypeIdent) -> SessionResult<Vec<TypeIdent>> {
        let snapshot = self.snapshot();
        if !snapshot.registry().contains(child) {
            return Err(SessionError::UnknownType(child.clone()));
        }
        Ok(snapshot.index().valid_parent_types(child).to_vec())
    }

    // ==================== Enforcement ====================

    /// Check a proposed attachment without mutating the tree.
    pub fn enforce_on_attach(
        &self,
        tree: &Tree,
        parent: NodeId,
        child: NodeId,
    ) -> Result<(), Violation> {
        let snapshot = self.snapshot();
        snapshot.enforcer().enforce_on_attach(tree, parent, child)
    }

    /// Check, then link.
    pub fn attach(&self, tree: &mut Tree, parent: NodeId, child: NodeId) -> Result<(), Violation> {
        let snapshot = self.snapshot();
        snapshot.enforcer().attach(tree, parent, child)
    }

    /// Check a proposed attribute assignment without mutating the tree.
    pub fn enforce_on_set_value(
        &self,
        tree: &Tree,
        node: NodeId,
        attr: &str,
        value: &Value,
    ) -> Result<(), Violations> {
        let snapshot = self.snapshot();
        snapshot
            .enforcer()
            .enforce_on_set_value(tree, node, attr, value)
    }

    /// Check, then assign.
    pub fn set_value(
        &self,
        tree: &mut Tree,
        node: NodeId,
        attr: &str,
        value: Value,
    ) -> Result<(), Violations> {
        let snapshot = self.snapshot();
        snapshot.enforcer().set_value(tree, node, attr, value)
    }
}

/// Replay the providers into a fresh builder and seal one generation.
fn build_generation(
    providers: &[Box<dyn SchemaProvider>],
    number: u64,
) -> ConfigResult<Generation> {
    let mut builder = RegistryBuilder::new();
    for provider in providers {
        provider.provide(&mut builder)?;
    }
    Ok(Generation::new(number, builder.seal()?))
}

/// Read the current snapshot, tolerating a poisoned lock: the data is an
/// immutable Arc swap target, so a panicked writer cannot have torn it.
fn read_lock(lock: &RwLock<Arc<Generation>>) -> Arc<Generation> {
    match lock.read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}
