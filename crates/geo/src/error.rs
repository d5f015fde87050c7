//! # Errors
//!
//! Error types for the import pipeline and for `preview.toml` loading.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result alias for pipeline operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Pipeline error types.
#[derive(Error, Debug)]
pub enum GeoError {
    // ========================================================================
    // Input Errors
    // ========================================================================

    #[error("Input not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ========================================================================
    // Content Errors
    // ========================================================================

    #[error("Malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Schema violation: {0}")]
    Schema(String),

    #[error("No coordinates found to compute a bounding box")]
    EmptyInput,
}

impl GeoError {
    /// Shorthand for a schema violation with a formatted message
    pub(crate) fn schema(message: impl Into<String>) -> Self {
        GeoError::Schema(message.into())
    }

    /// Map a read failure on `path`; a missing file becomes `NotFound`
    pub(crate) fn from_io(path: &Path, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => GeoError::NotFound(path.to_path_buf()),
            _ => GeoError::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

/// Errors from loading `preview.toml`
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
