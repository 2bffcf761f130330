//! Error types for gitproject

use std::path::PathBuf;

use thiserror::Error;

use crate::git::AdapterError;

/// Result type alias for gitproject operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for gitproject operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No manifest could be located
    #[error("Manifest not found: {0}")]
    ManifestMissing(String),

    /// The manifest exists but cannot be used
    #[error("Invalid manifest {}: {message}", .path.display())]
    ManifestInvalid {
        /// Path of the offending manifest
        path: PathBuf,
        /// What is wrong with it
        message: String,
    },

    /// Version control failure
    #[error(transparent)]
    Adapter(#[from] AdapterError),
}
