//! Compiled regular-expression patterns.
//!
//! Name selectors and match constraints carry their regex in compiled form
//! so a malformed pattern surfaces as a configuration error at declaration
//! time and every query against sealed schema data is infallible.

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Error returned when a pattern source fails to compile.
#[derive(Debug, Error)]
#[error("Invalid pattern {source_text:?}: {message}")]
pub struct PatternError {
    source_text: String,
    message: String,
}

impl PatternError {
    /// The pattern source that failed to compile.
    pub fn source_text(&self) -> &str {
        &self.source_text
    }
}

/// A compiled regular expression paired with its source text.
///
/// Equality, ordering of error messages, and Display all use the source;
/// the compiled form is shared cheaply via Arc.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: Arc<regex_lite::Regex>,
}

impl Pattern {
    /// Compile a pattern from its source text.
    pub fn new(source: impl Into<String>) -> Result<Self, PatternError> {
        let source = source.into();
        let regex = regex_lite::Regex::new(&source).map_err(|e| PatternError {
            source_text: source.clone(),
            message: e.to_string(),
        })?;
        Ok(Self {
            source,
            regex: Arc::new(regex),
        })
    }

    /// The pattern source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Test the pattern against a candidate string.
    pub fn is_match(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Pattern {}
