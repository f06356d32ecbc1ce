//! Trellis Flatten
//!
//! Precompute inheritance-resolved placement rules into a directly
//! queryable index, so the hierarchy is never walked on the query path.
//!
//! Responsibilities:
//! - Flatten per-type inherited declarations into per-type rule tables
//! - Merge parent-side and child-side declarations into one verdict
//! - Apply explicit allow/forbid rules (forbid always wins)
//! - Serve reverse lookups for tooling and diagnostics

mod decision;
mod index;
mod specificity;

pub use decision::{Decision, RuleMatch};
pub use index::{FlatAttr, FlattenedIndex};
pub use specificity::Specificity;
