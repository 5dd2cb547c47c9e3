//! Error types for extforge
//!
//! Library errors use `thiserror`; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for extforge operations
pub type ExtforgeResult<T> = Result<T, ExtforgeError>;

/// Main error type for extforge operations
#[derive(Error, Debug)]
pub enum ExtforgeError {
    /// Two build targets share a name
    #[error("duplicate build target '{name}'")]
    DuplicateTarget { name: String },

    /// Target name cannot be used as a bundle file name
    #[error("invalid build target name '{name}': {reason}")]
    InvalidTargetName { name: String, reason: String },

    /// Page template asks for a chunk the registry does not define
    #[error("page '{page}' includes unknown chunk '{chunk}'")]
    UnknownChunk { page: String, chunk: String },

    /// Two page templates render to the same file
    #[error("duplicate page output '{filename}'")]
    DuplicatePage { filename: String },

    /// Page output name would land outside the output directory
    #[error("invalid page output '{filename}': {reason}")]
    InvalidPageFilename { filename: String, reason: String },

    /// Asset rule pattern could not be compiled
    #[error("invalid asset rule pattern '{pattern}': {message}")]
    InvalidMatcher { pattern: String, message: String },

    /// `extforge.toml` could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    ConfigParse { file: PathBuf, message: String },

    /// A required source file does not exist
    #[error("missing {role} source: {path}")]
    MissingSource { role: String, path: PathBuf },

    /// Two pipeline steps produced the same output path
    #[error("output '{path}' is produced more than once")]
    DuplicateArtifact { path: PathBuf },

    /// A source failed its assigned transform
    #[error("transform failed for {path}: {message}")]
    Transform { path: PathBuf, message: String },

    /// Static manifest is not a valid JSON object
    #[error("invalid manifest {path}: {message}")]
    Manifest { path: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtforgeError {
    /// True for errors raised before the build touches the output directory.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            ExtforgeError::DuplicateTarget { .. }
                | ExtforgeError::InvalidTargetName { .. }
                | ExtforgeError::UnknownChunk { .. }
                | ExtforgeError::DuplicatePage { .. }
                | ExtforgeError::InvalidPageFilename { .. }
                | ExtforgeError::InvalidMatcher { .. }
                | ExtforgeError::ConfigParse { .. }
                | ExtforgeError::MissingSource { .. }
                | ExtforgeError::DuplicateArtifact { .. }
        )
    }
}
