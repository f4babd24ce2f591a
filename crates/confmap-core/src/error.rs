//! Error types for the mapping engine.

use thiserror::Error;

/// Errors produced when reading a [`Mapping`](crate::Mapping).
///
/// Building a mapping never fails; only projections that would lose
/// information report errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// Two distinct keys (one relative, one absolute) resolve to the same
    /// property name.
    #[error("duplicate configuration key: {key}")]
    DuplicateKey {
        /// The colliding property name.
        key: String,
    },
}

impl MappingError {
    /// Creates a duplicate key error.
    pub fn duplicate_key(key: impl Into<String>) -> Self {
        Self::DuplicateKey { key: key.into() }
    }
}

/// Result type for mapping projections.
pub type MappingResult<T> = Result<T, MappingError>;
