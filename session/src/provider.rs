//! Schema providers.
//!
//! Providers populate the registry during bootstrap and are replayed on
//! reload. They are plain values handed to the session, the explicit
//! replacement for process-wide discovery: no hidden global state, and the
//! same provider list deterministically produces every generation.

use trellis_registry::{ConfigResult, RegistryBuilder};

/// A source of type definitions and explicit rules.
pub trait SchemaProvider: Send + Sync {
    /// Register this provider's definitions into the builder.
    ///
    /// Registration order across providers is arbitrary; parent references
    /// into other providers' types resolve at seal.
    fn provide(&self, builder: &mut RegistryBuilder) -> ConfigResult<()>;
}

impl<F> SchemaProvider for F
where
    F: Fn(&mut RegistryBuilder) -> ConfigResult<()> + Send + Sync,
{
    fn provide(&self, builder: &mut RegistryBuilder) -> ConfigResult<()> {
        self(builder)
    }
}
