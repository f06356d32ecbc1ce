//! Trellis Registry
//!
//! The authoritative type catalog. Single source of truth mapping
//! `(category, variant)` identifiers to type definitions: placement
//! declarations, attribute specs, validation checks, and the
//! single-inheritance parent link. Built once through RegistryBuilder,
//! sealed, then read for the process lifetime.

mod builder;
mod registry;
mod types;

pub use builder::{ConfigError, ConfigResult, RegistryBuilder};
pub use registry::{Registry, ResolvedAttr};
pub use types::*;
