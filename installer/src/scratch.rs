//! Scoped scratch space for a single install run.
//!
//! A [`ScratchDir`] deletes itself when dropped, which covers success and
//! every error path. Interruption bypasses destructors, so live scratch
//! directories are also registered with a process-wide list that the
//! SIGINT/SIGTERM hook removes before exiting.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tempfile::TempDir;

/// Exit code used when the process is interrupted.
pub const EXIT_INTERRUPTED: i32 = 130;

/// Prefix for scratch directory names under the system temp dir.
const SCRATCH_PREFIX: &str = "ralf-install-";

/// Scratch directories that must be removed if the process is interrupted.
static LIVE_DIRS: Mutex<Vec<PathBuf>> = Mutex::new(Vec::new());

/// A temporary directory owned by one install run.
#[derive(Debug)]
pub struct ScratchDir {
    dir: TempDir,
}

impl ScratchDir {
    /// Create a fresh scratch directory under the system temp dir.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised while creating the directory.
    pub fn create() -> std::io::Result<Self> {
        let dir = tempfile::Builder::new().prefix(SCRATCH_PREFIX).tempdir()?;
        log::debug!("created scratch directory {}", dir.path().display());
        register(dir.path());
        Ok(Self { dir })
    }

    /// Return the directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        unregister(self.dir.path());
        log::debug!("removing scratch directory {}", self.dir.path().display());
    }
}

fn register(path: &Path) {
    LIVE_DIRS
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(path.to_path_buf());
}

fn unregister(path: &Path) {
    LIVE_DIRS
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .retain(|live| live != path);
}

/// Return the scratch directories currently alive in this process.
#[must_use]
pub fn live_scratch_dirs() -> Vec<PathBuf> {
    LIVE_DIRS
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Remove every registered scratch directory.
///
/// Runs from the interrupt hook, so failures are ignored.
pub fn remove_live_scratch_dirs() {
    let dirs = std::mem::take(&mut *LIVE_DIRS.lock().unwrap_or_else(PoisonError::into_inner));
    remove_all(&dirs);
}

fn remove_all(dirs: &[PathBuf]) {
    for dir in dirs {
        if std::fs::remove_dir_all(dir).is_err() {
            // Best-effort cleanup; the process is exiting anyway.
        }
    }
}

/// Install a SIGINT/SIGTERM hook that removes live scratch directories and
/// exits with [`EXIT_INTERRUPTED`].
///
/// # Errors
///
/// Returns an error if a handler is already installed or the platform
/// refuses the registration.
pub fn install_interrupt_hook() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(|| {
        remove_live_scratch_dirs();
        std::process::exit(EXIT_INTERRUPTED);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_removes_directory_and_registration() {
        let scratch = ScratchDir::create().expect("create scratch");
        let path = scratch.path().to_path_buf();
        assert!(path.is_dir());
        assert!(live_scratch_dirs().contains(&path));

        drop(scratch);

        assert!(!path.exists());
        assert!(!live_scratch_dirs().contains(&path));
    }

    #[test]
    fn scratch_dirs_use_recognisable_prefix() {
        let scratch = ScratchDir::create().expect("create scratch");
        let name = scratch
            .path()
            .file_name()
            .and_then(|n| n.to_str())
            .expect("UTF-8 name");
        assert!(name.starts_with(SCRATCH_PREFIX));
    }

    #[test]
    fn remove_all_deletes_nested_trees_and_tolerates_missing_paths() {
        let temp = tempfile::tempdir().expect("temp dir");
        let orphan = temp.path().join("orphan");
        std::fs::create_dir_all(orphan.join("nested")).expect("create orphan");
        std::fs::write(orphan.join("nested/ralf.tar.gz"), b"partial").expect("write");

        remove_all(&[temp.path().join("never-created"), orphan.clone()]);

        assert!(!orphan.exists());
    }

    #[test]
    fn unregister_only_forgets_the_given_path() {
        let first = PathBuf::from("/nonexistent/ralf-install-first");
        let second = PathBuf::from("/nonexistent/ralf-install-second");
        register(&first);
        register(&second);

        unregister(&first);

        let live = live_scratch_dirs();
        assert!(!live.contains(&first));
        assert!(live.contains(&second));
        unregister(&second);
    }
}
