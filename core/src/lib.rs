//! Trellis Core Types
//!
//! This crate provides the foundational types used throughout the Trellis
//! system:
//! - Type identifiers (the `(category, variant)` pair naming every type)
//! - Node identity (NodeId)
//! - Value types (the closed Value enum and attribute maps)
//! - Compiled patterns for name and match constraints
//! - Node paths for violation reporting

mod id;
mod ident;
mod path;
mod pattern;
mod value;

pub use id::*;
pub use ident::*;
pub use path::*;
pub use pattern::*;
pub use value::*;
