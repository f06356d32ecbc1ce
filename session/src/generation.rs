//! Registry generations.
//!
//! A generation is one immutable snapshot: the sealed registry plus its
//! flattened index. The index is built lazily, at most once, behind a
//! compute-once guard, so concurrent first callers either block briefly on
//! the single build or observe a fully formed index.

use std::sync::OnceLock;
use trellis_constraint::Enforcer;
use trellis_flatten::FlattenedIndex;
use trellis_registry::Registry;

/// One immutable registry generation.
#[derive(Debug)]
pub struct Generation {
    /// Monotonically increasing generation number.
    number: u64,
    /// The sealed registry.
    registry: Registry,
    /// Flattened index, built on first placement query.
    index: OnceLock<FlattenedIndex>,
}

impl Generation {
    pub(crate) fn new(number: u64, registry: Registry) -> Self {
        Self {
            number,
            registry,
            index: OnceLock::new(),
        }
    }

    /// The generation number.
    pub fn number(&self) -> u64 {
        self.number
    }

    /// The sealed registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The flattened index, building it on first use.
    pub fn index(&self) -> &FlattenedIndex {
        self.index
            .get_or_init(|| FlattenedIndex::build(&self.registry))
    }

    /// An enforcer over this generation's index.
    pub fn enforcer(&self) -> Enforcer<'_> {
        Enforcer::new(self.index())
    }
}
