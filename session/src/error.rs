//! Session error types.

use thiserror::Error;
use trellis_core::TypeIdent;
use trellis_registry::ConfigError;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors surfaced by the session facade.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A query referenced a type absent from the current generation.
    #[error("Unknown type: {0}")]
    UnknownType(TypeIdent),

    /// A configuration error from registration, sealing, or reload.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
