//! Removal of an installed `ralf` binary.
//!
//! Uninstalling is idempotent: a missing binary produces a warning and a
//! successful outcome. Only `<prefix>/bin/ralf` is removed; the `bin`
//! directory and anything else under the prefix are left alone.

use camino::{Utf8Path, Utf8PathBuf};
use std::io::{ErrorKind, Write};

use crate::error::{InstallerError, Result};
use crate::install::installed_binary_path;
use crate::output::{write_stderr_line, write_warning};

/// How an uninstall run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UninstallOutcome {
    /// The binary at this path was deleted.
    Removed(Utf8PathBuf),
    /// Nothing was installed at this path.
    NotInstalled(Utf8PathBuf),
}

/// Remove `<prefix>/bin/ralf`.
///
/// # Errors
///
/// Returns [`InstallerError::RemoveFailed`] when the binary exists but
/// cannot be deleted.
///
/// # Examples
///
/// ```
/// use camino::Utf8PathBuf;
/// use ralf_installer::uninstall::{UninstallOutcome, uninstall};
///
/// let temp = tempfile::tempdir().expect("temp dir");
/// let prefix = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("UTF-8");
/// let mut stderr = Vec::new();
///
/// let outcome = uninstall(&prefix, false, &mut stderr).expect("idempotent");
/// assert!(matches!(outcome, UninstallOutcome::NotInstalled(_)));
/// ```
pub fn uninstall(
    prefix: &Utf8Path,
    quiet: bool,
    stderr: &mut dyn Write,
) -> Result<UninstallOutcome> {
    let path = installed_binary_path(prefix);

    match std::fs::remove_file(&path) {
        Ok(()) => {
            if !quiet {
                write_stderr_line(stderr, format_args!("Removed {path}"));
            }
            Ok(UninstallOutcome::Removed(path))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            write_warning(stderr, format_args!("ralf is not installed at {path}"));
            Ok(UninstallOutcome::NotInstalled(path))
        }
        Err(e) => Err(InstallerError::RemoveFailed {
            path,
            reason: e.to_string(),
        }),
    }
}
