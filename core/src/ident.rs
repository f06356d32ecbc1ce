//! Type identifiers.
//!
//! Every metadata type is named by a two-part identifier: a category
//! (the broad kind, e.g. `field` or `object`) and a variant (the concrete
//! flavor, e.g. `string`). Identifiers are immutable, hashable, and totally
//! ordered so registry iteration is deterministic.

use std::fmt;
use thiserror::Error;

/// A `(category, variant)` pair naming a metadata type.
///
/// Ordering is by category first, then variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeIdent {
    category: String,
    variant: String,
}

/// Error returned when parsing a type identifier from text.
#[derive(Debug, Error)]
#[error("Invalid type identifier {input:?}: expected \"category.variant\"")]
pub struct IdentParseError {
    input: String,
}

impl TypeIdent {
    /// Create an identifier from its two parts.
    pub fn new(category: impl Into<String>, variant: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            variant: variant.into(),
        }
    }

    /// Parse an identifier from its `category.variant` display form.
    ///
    /// Only the first dot separates the parts, so variants may themselves
    /// contain dots.
    pub fn parse(input: &str) -> Result<Self, IdentParseError> {
        match input.split_once('.') {
            Some((category, variant)) if !category.is_empty() && !variant.is_empty() => {
                Ok(Self::new(category, variant))
            }
            _ => Err(IdentParseError {
                input: input.to_string(),
            }),
        }
    }

    /// The category part.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// The variant part.
    pub fn variant(&self) -> &str {
        &self.variant
    }
}

impl fmt::Display for TypeIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.category, self.variant)
    }
}
