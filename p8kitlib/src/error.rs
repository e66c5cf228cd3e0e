//! Error types for p8kitlib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while counting, splitting, joining or comparing carts
#[derive(Error, Debug)]
pub enum P8kitError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// Path exists but is not a directory
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// Split target directory is already present
    #[error("directory '{0}' already exists, refusing to overwrite")]
    DirectoryExists(PathBuf),

    /// No mappings.txt in the directory being joined
    #[error("mapping file not found: {0}")]
    MappingNotFound(PathBuf),
}

impl P8kitError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        P8kitError::FileRead {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        P8kitError::FileWrite {
            path: path.into(),
            source,
        }
    }
}
