//! Directory resolution abstraction for platform-specific paths.
//!
//! The default install prefix lives under the user's home directory. Routing
//! the lookup through [`BaseDirs`] lets tests pin or remove the home
//! directory without touching the real environment.

use crate::error::{InstallerError, Result};
use camino::Utf8PathBuf;
use std::path::PathBuf;

/// Prefix directory, relative to the home directory, used when neither
/// `--prefix` nor `PREFIX` is set.
const DEFAULT_PREFIX_SUBDIR: &str = ".local";

/// Resolves base directories for the current user.
pub trait BaseDirs {
    /// Return the user's home directory, if known.
    fn home_dir(&self) -> Option<PathBuf>;
}

/// Resolves directories with `directories-next`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBaseDirs;

impl BaseDirs for SystemBaseDirs {
    fn home_dir(&self) -> Option<PathBuf> {
        directories_next::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
    }
}

/// Return `<home>/.local`.
///
/// # Errors
///
/// Returns [`InstallerError::HomeDirUnavailable`] if the home directory is
/// unknown or not valid UTF-8.
///
/// # Examples
///
/// ```
/// use ralf_installer::dirs::{BaseDirs, default_prefix};
/// use std::path::PathBuf;
///
/// struct FixedHome;
///
/// impl BaseDirs for FixedHome {
///     fn home_dir(&self) -> Option<PathBuf> {
///         Some(PathBuf::from("/home/ada"))
///     }
/// }
///
/// let prefix = default_prefix(&FixedHome).expect("home is known");
/// assert_eq!(prefix, "/home/ada/.local");
/// ```
pub fn default_prefix(dirs: &dyn BaseDirs) -> Result<Utf8PathBuf> {
    let home = dirs
        .home_dir()
        .ok_or_else(|| InstallerError::HomeDirUnavailable {
            reason: "no home directory for the current user".to_owned(),
        })?;
    let home = Utf8PathBuf::try_from(home).map_err(|e| InstallerError::HomeDirUnavailable {
        reason: format!("home directory is not valid UTF-8: {e}"),
    })?;
    Ok(home.join(DEFAULT_PREFIX_SUBDIR))
}

/// Return `prefix` when given, otherwise `<home>/.local`.
///
/// # Errors
///
/// Propagates [`default_prefix`] errors when no prefix was given.
pub fn resolve_prefix(prefix: Option<Utf8PathBuf>, dirs: &dyn BaseDirs) -> Result<Utf8PathBuf> {
    match prefix {
        Some(prefix) => Ok(prefix),
        None => default_prefix(dirs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestBaseDirs {
        home_dir: Option<PathBuf>,
    }

    impl BaseDirs for TestBaseDirs {
        fn home_dir(&self) -> Option<PathBuf> {
            self.home_dir.clone()
        }
    }

    #[test]
    fn explicit_prefix_wins_over_home() {
        let dirs = TestBaseDirs { home_dir: None };
        let prefix = resolve_prefix(Some(Utf8PathBuf::from("/opt/ralf")), &dirs)
            .expect("explicit prefix");
        assert_eq!(prefix, "/opt/ralf");
    }

    #[test]
    fn missing_prefix_falls_back_to_home_local() {
        let dirs = TestBaseDirs {
            home_dir: Some(PathBuf::from("/home/grace")),
        };
        let prefix = resolve_prefix(None, &dirs).expect("home prefix");
        assert_eq!(prefix, "/home/grace/.local");
    }

    #[test]
    fn missing_home_is_an_error() {
        let dirs = TestBaseDirs { home_dir: None };
        let err = resolve_prefix(None, &dirs).expect_err("no home");
        assert!(matches!(err, InstallerError::HomeDirUnavailable { .. }));
    }

    #[test]
    fn system_dirs_follow_home_env() {
        temp_env::with_var("HOME", Some("/tmp/ralf-home"), || {
            let home = SystemBaseDirs.home_dir();
            if cfg!(unix) {
                assert_eq!(home, Some(PathBuf::from("/tmp/ralf-home")));
            }
        });
    }
}
