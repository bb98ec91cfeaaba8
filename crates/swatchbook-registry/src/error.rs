//! Error types for registry assembly.

use thiserror::Error;

/// Errors that can occur while building or persisting the registry.
///
/// Per-component failures (unreadable files, missing variant tables) are
/// deliberately *not* represented here: those are logged and skip the
/// component, never failing the run.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A required path could not be read or written.
    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The components directory does not exist or is not a directory.
    #[error("components directory {path} does not exist")]
    MissingDir { path: String },

    /// Registry or cache document failed to serialize.
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
