//! LockfileRepository port - abstraction for build lock persistence

use std::path::Path;

use crate::domain::entities::Lockfile;
use crate::error::ExtforgeError;

/// Result type for lockfile operations
pub type LockfileResult<T> = Result<T, LockfileError>;

/// Lockfile operation errors
#[derive(Debug)]
pub enum LockfileError {
    /// Invalid lockfile format
    InvalidFormat(String),
    /// Lockfile written by an incompatible version
    VersionMismatch { found: u32, expected: u32 },
    /// I/O error
    Io(String),
}

impl std::fmt::Display for LockfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LockfileError::InvalidFormat(msg) => write!(f, "Invalid lockfile format: {}", msg),
            LockfileError::VersionMismatch { found, expected } => write!(
                f,
                "Lockfile version {} is not supported (expected {})",
                found, expected
            ),
            LockfileError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for LockfileError {}

impl From<LockfileError> for ExtforgeError {
    fn from(err: LockfileError) -> Self {
        ExtforgeError::Io(std::io::Error::other(err.to_string()))
    }
}

/// Abstract repository for the build lock
pub trait LockfileRepository {
    /// Load lockfile from path, or an empty one if missing or unreadable
    fn load_or_new(&self, path: &Path) -> Lockfile;

    /// Load lockfile from path (missing file yields an empty lockfile)
    fn load(&self, path: &Path) -> LockfileResult<Lockfile>;

    /// Save lockfile to path
    fn save(&self, lockfile: &Lockfile, path: &Path) -> LockfileResult<()>;

    /// Delete lockfile (missing file is not an error)
    fn delete(&self, path: &Path) -> LockfileResult<()>;
}

impl<T: LockfileRepository + ?Sized> LockfileRepository for &T {
    fn load_or_new(&self, path: &Path) -> Lockfile {
        (**self).load_or_new(path)
    }

    fn load(&self, path: &Path) -> LockfileResult<Lockfile> {
        (**self).load(path)
    }

    fn save(&self, lockfile: &Lockfile, path: &Path) -> LockfileResult<()> {
        (**self).save(lockfile, path)
    }

    fn delete(&self, path: &Path) -> LockfileResult<()> {
        (**self).delete(path)
    }
}
