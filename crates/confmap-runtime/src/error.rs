//! Runtime error types.

use std::path::PathBuf;

use confmap_core::MappingError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while flattening and rendering documents.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The flattened properties are inconsistent.
    #[error("Invalid flattened configuration: {0}")]
    Mapping(#[from] MappingError),

    /// Document file not found.
    #[error("Document not found: {0}")]
    DocumentNotFound(PathBuf),

    /// Document could not be read or parsed.
    #[error("Failed to read document {path}: {reason}")]
    Document { path: PathBuf, reason: String },

    /// Rendered properties could not be written.
    #[error("Failed to write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RuntimeError {
    /// Creates a document error.
    pub fn document(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Document {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
