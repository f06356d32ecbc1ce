//! Trellis Session
//!
//! The facade collaborators (parsers, generators, framework bridges) talk
//! to. Owns the provider list and the current registry generation:
//! bootstrap seals generation 1, reads delegate to an immutable snapshot,
//! reload swaps in a new generation atomically while in-flight readers
//! finish on the old one.

mod error;
mod generation;
mod provider;
mod session;

pub use error::{SessionError, SessionResult};
pub use generation::Generation;
pub use provider::SchemaProvider;
pub use session::Session;
