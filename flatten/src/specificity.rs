//! Match specificity ranking.
//!
//! When several rules sanction the same placement, the most specific match
//! is reported as the granting rule. Exact selectors outrank patterns,
//! patterns outrank wildcards, and the variant dimension outranks the name
//! dimension, which outranks the category dimension.

use trellis_registry::{NameSpec, TypeSpec};

/// How precisely a rule pins each dimension of a placement.
///
/// Field order carries the lexicographic ranking: variant, then name, then
/// category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Specificity {
    variant: u8,
    name: u8,
    category: u8,
}

impl Specificity {
    /// Rank a rule's selectors.
    pub fn of(category: &TypeSpec, variant: &TypeSpec, name: &NameSpec) -> Self {
        Self {
            variant: type_rank(variant),
            name: name_rank(name),
            category: type_rank(category),
        }
    }
}

fn type_rank(spec: &TypeSpec) -> u8 {
    match spec {
        TypeSpec::Exact(_) => 2,
        TypeSpec::Any => 0,
    }
}

fn name_rank(spec: &NameSpec) -> u8 {
    match spec {
        NameSpec::Exact(_) => 2,
        NameSpec::Pattern(_) => 1,
        NameSpec::Any => 0,
    }
}
