use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::constants::BACKUP_SUFFIX;
use crate::core::{HowtoError, HowtoResult};
use crate::upgrade::fetcher::{StagingFile, make_executable};

/// Rename primitive used for every move the replacer makes.
///
/// Always [`std::fs::rename`] in production; tests substitute failing
/// versions to drive the rollback and cross-device paths.
pub type RenameFn = fn(&Path, &Path) -> io::Result<()>;

/// Swaps a staged binary into the place of the installed one.
///
/// `AtomicReplacer` guarantees that once [`replace`](Self::replace) returns,
/// exactly one executable exists at the target path: either the new binary
/// (success) or the original (failure). The only exception is a failed
/// rollback, which is reported as [`HowtoError::RollbackFailed`] together
/// with the location of the backup.
///
/// # Swap Protocol
///
/// ```text
/// 1. resolve target to its real path (symlinks followed)
/// 2. rename target        -> target.bak        (fails: nothing changed)
/// 3. rename staging       -> target
///    ├── cross-device:  copy staging bytes -> target, chmod 755, drop staging
///    └── other failure: rename target.bak -> target, return error
/// 4. remove target.bak    (failure is only a warning)
/// ```
///
/// The backup-then-swap ordering means there is never a moment where the
/// target path is empty except between steps 2 and 3, and a failure there
/// triggers the explicit rollback.
///
/// # Cross-Filesystem Installs
///
/// Staging files live in the temp directory, which is often a different
/// filesystem from the install directory (`/tmp` as tmpfs). Rename cannot
/// cross filesystems, so the replacer falls back to copying. The copy is not
/// atomic: a crash in the middle of it can leave a truncated binary at the
/// target, with the intact original still at `target.bak`.
///
/// # Concurrency
///
/// There is no lock. Two upgrades racing on the same path can clobber each
/// other's backup; this is unsupported.
#[derive(Debug, Clone, Copy)]
pub struct AtomicReplacer {
    rename: RenameFn,
}

fn os_rename(from: &Path, to: &Path) -> io::Result<()> {
    fs::rename(from, to)
}

impl Default for AtomicReplacer {
    fn default() -> Self {
        Self {
            rename: os_rename,
        }
    }
}

impl AtomicReplacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different rename primitive.
    pub fn with_rename(rename: RenameFn) -> Self {
        Self {
            rename,
        }
    }

    /// Sibling path the installed binary is parked at during the swap.
    pub fn backup_path_for(target: &Path) -> PathBuf {
        let mut name = target.as_os_str().to_os_string();
        name.push(BACKUP_SUFFIX);
        PathBuf::from(name)
    }

    /// Install `staging` at `target`.
    ///
    /// Returns the resolved (symlink-free) path that was replaced. The
    /// staging file is consumed on every path: moved into place, or deleted.
    ///
    /// # Errors
    ///
    /// - [`HowtoError::PermissionDenied`] if the install location is not writable
    /// - [`HowtoError::IoError`] for any other filesystem failure
    /// - [`HowtoError::RollbackFailed`] if the swap failed and the original
    ///   could not be moved back
    pub fn replace(&self, staging: StagingFile, target: &Path) -> HowtoResult<PathBuf> {
        let target =
            fs::canonicalize(target).map_err(|e| HowtoError::from_io("resolve", target, e))?;
        let backup = Self::backup_path_for(&target);
        info!("Replacing {} (backup at {})", target.display(), backup.display());

        (self.rename)(&target, &backup)
            .map_err(|e| HowtoError::from_io("move aside", &target, e))?;
        debug!("Moved current binary to {}", backup.display());

        match (self.rename)(staging.path(), &target) {
            Ok(()) => staging.disarm(),
            Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
                warn!(
                    "{} and {} are on different filesystems, copying instead of renaming",
                    staging.path().display(),
                    target.display()
                );
                if let Err(copy_err) = copy_into_place(staging.path(), &target) {
                    return Err(self.roll_back(&backup, &target, copy_err));
                }
                // Dropping the guard deletes the staging copy.
                drop(staging);
            }
            Err(e) => {
                let cause = HowtoError::from_io("install new binary at", &target, e);
                return Err(self.roll_back(&backup, &target, cause));
            }
        }

        if let Err(e) = fs::remove_file(&backup) {
            warn!(
                "Upgrade succeeded but the backup {} could not be removed: {}",
                backup.display(),
                e
            );
        }

        info!("Installed new binary at {}", target.display());
        Ok(target)
    }

    /// Move the backup back over `target` and hand back the error to report.
    fn roll_back(&self, backup: &Path, target: &Path, cause: HowtoError) -> HowtoError {
        warn!("Replacement failed ({}), restoring {}", cause, backup.display());
        match (self.rename)(backup, target) {
            Ok(()) => {
                info!("Restored previous binary at {}", target.display());
                cause
            }
            Err(e) => {
                error!(
                    "Could not restore {} to {}: {}",
                    backup.display(),
                    target.display(),
                    e
                );
                HowtoError::RollbackFailed {
                    cause: Box::new(cause),
                    backup: backup.to_path_buf(),
                    target: target.to_path_buf(),
                    source: e,
                }
            }
        }
    }
}

/// Non-atomic fallback: write the staged bytes to `target` and mark it executable.
fn copy_into_place(staging: &Path, target: &Path) -> HowtoResult<()> {
    fs::copy(staging, target).map_err(|e| HowtoError::from_io("copy new binary to", target, e))?;
    let file = fs::File::open(target).map_err(|e| HowtoError::from_io("open", target, e))?;
    make_executable(&file, target)
}
