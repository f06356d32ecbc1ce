//! Trellis Constraint
//!
//! Validate tree mutations against the flattened rule index and declared
//! value checks.
//!
//! Responsibilities:
//! - Gate attach operations on the merged placement verdict
//! - Gate attribute assignments on declared specs and inherited checks
//! - Collect every failure for one assignment, not just the first
//! - Produce violations carrying stable ids and root-to-offender paths

mod checks;
mod enforcer;
pub mod ids;
mod violation;

pub use checks::{evaluate_check, evaluate_spec, types_compatible};
pub use enforcer::Enforcer;
pub use violation::{Violation, Violations};
