//! TOML Lockfile Repository
//!
//! Implements the LockfileRepository port using TOML format.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Lockfile, LockfileEntry};
use crate::domain::ports::file_system::FileSystem;
use crate::domain::ports::lockfile_repository::{LockfileError, LockfileRepository};
use crate::infrastructure::fs::LocalFs;

/// TOML-based lockfile repository
///
/// Stores the build lock as `.extforge.lock` inside the output directory.
pub struct TomlLockfileRepository {
    fs: LocalFs,
}

impl TomlLockfileRepository {
    /// Create a new repository with the default file system
    pub fn new() -> Self {
        Self { fs: LocalFs::new() }
    }
}

impl Default for TomlLockfileRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// TOML representation of a file entry
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlFileEntry {
    hash: String,
    #[serde(default)]
    origin: String,
}

/// TOML representation of the lockfile
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlLockfile {
    version: u32,
    #[serde(default)]
    files: BTreeMap<String, TomlFileEntry>,
}

impl LockfileRepository for TomlLockfileRepository {
    fn load_or_new(&self, path: &Path) -> Lockfile {
        self.load(path).unwrap_or_else(|_| Lockfile::new())
    }

    fn load(&self, path: &Path) -> Result<Lockfile, LockfileError> {
        if !self.fs.exists(path) {
            return Ok(Lockfile::new());
        }

        let content = self
            .fs
            .read(path)
            .map_err(|e| LockfileError::Io(e.to_string()))?;
        let toml_lockfile: TomlLockfile =
            toml::from_str(&content).map_err(|e| LockfileError::InvalidFormat(e.to_string()))?;

        let expected_version = Lockfile::new().version();
        if toml_lockfile.version != expected_version {
            return Err(LockfileError::VersionMismatch {
                found: toml_lockfile.version,
                expected: expected_version,
            });
        }

        let mut lockfile = Lockfile::new();
        for (key, entry) in toml_lockfile.files {
            lockfile.set_entry(key, LockfileEntry::new(entry.hash, entry.origin));
        }

        Ok(lockfile)
    }

    fn save(&self, lockfile: &Lockfile, path: &Path) -> Result<(), LockfileError> {
        let files = lockfile
            .entries()
            .map(|(key, entry)| {
                (
                    key.to_string(),
                    TomlFileEntry {
                        hash: entry.hash().to_string(),
                        origin: entry.origin().to_string(),
                    },
                )
            })
            .collect();

        let toml_lockfile = TomlLockfile {
            version: lockfile.version(),
            files,
        };

        let content = toml::to_string_pretty(&toml_lockfile)
            .map_err(|e| LockfileError::InvalidFormat(e.to_string()))?;
        self.fs
            .write(path, content.as_bytes())
            .map_err(|e| LockfileError::Io(e.to_string()))?;

        Ok(())
    }

    fn delete(&self, path: &Path) -> Result<(), LockfileError> {
        if self.fs.exists(path) {
            self.fs
                .remove(path)
                .map_err(|e| LockfileError::Io(e.to_string()))?;
        }
        Ok(())
    }
}
