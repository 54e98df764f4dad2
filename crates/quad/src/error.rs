//! Error types for loading quad-code files.

use thiserror::Error;

/// Errors produced while loading a quad-code file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The file could not be read.
    #[error("cannot read '{path}': {message}")]
    Io { path: String, message: String },
}
