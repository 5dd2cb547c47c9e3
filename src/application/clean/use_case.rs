//! Clean Use Case
//!
//! Removes the outputs of the previous build, as recorded in its lock.

use std::path::{Component, Path};

use crate::domain::entities::{parse_lockfile_path, Lockfile, LOCKFILE_NAME};
use crate::domain::ports::{FileSystem, FsError, LockfileRepository};
use crate::error::ExtforgeResult;

use super::options::CleanOptions;
use super::result::{CleanResult, SkipReason};

/// Clean use case - removes built files tracked in the lockfile
///
/// Only files whose content still matches the recorded hash are deleted.
/// Anything the build did not write, or that changed since, stays.
pub struct CleanUseCase<LR, FS>
where
    LR: LockfileRepository,
    FS: FileSystem,
{
    lockfile_repo: LR,
    fs: FS,
}

impl<LR, FS> CleanUseCase<LR, FS>
where
    LR: LockfileRepository,
    FS: FileSystem,
{
    /// Create a new clean use case
    pub fn new(lockfile_repo: LR, fs: FS) -> Self {
        Self { lockfile_repo, fs }
    }

    /// Clean `output_dir`. I/O failures while deleting abort the clean.
    pub fn execute(&self, output_dir: &Path, options: &CleanOptions) -> ExtforgeResult<CleanResult> {
        let lockfile_path = output_dir.join(LOCKFILE_NAME);
        let mut result = CleanResult::new();

        let lockfile = match self.lockfile_repo.load(&lockfile_path) {
            Ok(lockfile) => lockfile,
            Err(e) => {
                // Without a trustworthy record nothing may be deleted
                result.add_warning(format!(
                    "ignoring unreadable build lock {}: {}",
                    lockfile_path.display(),
                    e
                ));
                return Ok(result);
            }
        };

        self.process_lockfile(output_dir, &lockfile, options, &mut result)?;

        if !options.dry_run && self.fs.exists(&lockfile_path) {
            self.lockfile_repo.delete(&lockfile_path)?;
            result.lock_removed = true;
        }

        Ok(result)
    }

    fn process_lockfile(
        &self,
        output_dir: &Path,
        lockfile: &Lockfile,
        options: &CleanOptions,
        result: &mut CleanResult,
    ) -> ExtforgeResult<()> {
        for (key, entry) in lockfile.entries() {
            let rel = parse_lockfile_path(key);
            if !is_contained(&rel) {
                result.add_skipped(rel, SkipReason::OutsideOutput);
                continue;
            }

            let path = output_dir.join(&rel);
            if !self.fs.exists(&path) {
                result.add_skipped(rel, SkipReason::Missing);
                continue;
            }

            let actual = match self.fs.hash(&path) {
                Ok(hash) => hash,
                Err(_) => {
                    result.add_skipped(rel, SkipReason::Unreadable);
                    continue;
                }
            };
            if !actual.matches_str(entry.hash()) {
                result.add_skipped(rel, SkipReason::Modified);
                continue;
            }

            if !options.dry_run {
                match self.fs.remove(&path) {
                    Ok(()) | Err(FsError::NotFound(_)) => {}
                    Err(e) => return Err(e.into()),
                }
            }
            result.add_deleted(rel);
        }
        Ok(())
    }
}

/// Relative path with no root, prefix or `..` component
fn is_contained(rel: &Path) -> bool {
    rel.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        && rel.components().next().is_some()
}
