//! FileSystem port - abstraction over file I/O operations
//!
//! Pipeline steps read sources and the orchestrator writes outputs through
//! this trait, so steps can be exercised against any implementation.

use std::path::{Path, PathBuf};

use crate::domain::value_objects::ContentHash;
use crate::error::ExtforgeError;

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
#[derive(Debug)]
pub enum FsError {
    /// File not found
    NotFound(PathBuf),
    /// Permission denied
    PermissionDenied(PathBuf),
    /// Content is not valid UTF-8
    InvalidUtf8(PathBuf),
    /// I/O error
    Io(std::io::Error),
}

impl FsError {
    /// Attach the path an `io::Error` refers to
    pub fn at(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Io(err),
        }
    }
}

impl From<std::io::Error> for FsError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(PathBuf::new()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(PathBuf::new()),
            _ => FsError::Io(err),
        }
    }
}

impl std::fmt::Display for FsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FsError::NotFound(path) => write!(f, "File not found: {}", path.display()),
            FsError::PermissionDenied(path) => {
                write!(f, "Permission denied: {}", path.display())
            }
            FsError::InvalidUtf8(path) => write!(f, "Not valid UTF-8: {}", path.display()),
            FsError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for FsError {}

impl From<FsError> for ExtforgeError {
    fn from(err: FsError) -> Self {
        match err {
            FsError::Io(io) => ExtforgeError::Io(io),
            other => ExtforgeError::Io(std::io::Error::other(other.to_string())),
        }
    }
}

/// Abstract file system interface
pub trait FileSystem {
    /// Read file content as string
    fn read(&self, path: &Path) -> FsResult<String>;

    /// Read raw file content
    fn read_bytes(&self, path: &Path) -> FsResult<Vec<u8>>;

    /// Write content to file atomically, creating parent directories
    fn write(&self, path: &Path, content: &[u8]) -> FsResult<()>;

    /// Check if file exists
    fn exists(&self, path: &Path) -> bool;

    /// Remove a file
    fn remove(&self, path: &Path) -> FsResult<()>;

    /// Create directory and parents
    fn create_dir_all(&self, path: &Path) -> FsResult<()>;

    /// Compute content hash (SHA256)
    fn hash(&self, path: &Path) -> FsResult<ContentHash> {
        self.read_bytes(path).map(|bytes| ContentHash::from_bytes(&bytes))
    }
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn read(&self, path: &Path) -> FsResult<String> {
        (**self).read(path)
    }

    fn read_bytes(&self, path: &Path) -> FsResult<Vec<u8>> {
        (**self).read_bytes(path)
    }

    fn write(&self, path: &Path, content: &[u8]) -> FsResult<()> {
        (**self).write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn remove(&self, path: &Path) -> FsResult<()> {
        (**self).remove(path)
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        (**self).create_dir_all(path)
    }

    fn hash(&self, path: &Path) -> FsResult<ContentHash> {
        (**self).hash(path)
    }
}
