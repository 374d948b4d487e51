//! Host platform detection.
//!
//! Release archives exist for exactly four platforms. The host is probed with
//! `uname -s` and `uname -m` and the answers are mapped case-sensitively onto
//! [`Os`] and [`Arch`]; anything outside the supported set is fatal before
//! any network access happens.

use crate::command::{CommandExecutor, capture_stdout};
use crate::error::{InstallerError, Result};
use std::fmt;

/// Supported operating systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
    /// Linux (`uname -s` reports `Linux`).
    Linux,
    /// macOS (`uname -s` reports `Darwin`).
    Darwin,
}

impl Os {
    /// Map a kernel name as printed by `uname -s`.
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::UnsupportedOs`] for any other kernel name.
    pub fn from_kernel_name(kernel: &str) -> Result<Self> {
        match kernel {
            "Linux" => Ok(Self::Linux),
            "Darwin" => Ok(Self::Darwin),
            other => Err(InstallerError::UnsupportedOs {
                value: other.to_owned(),
            }),
        }
    }

    /// Return the release-asset spelling of this OS.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Darwin => "darwin",
        }
    }
}

/// Supported CPU architectures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    /// 64-bit x86 (`x86_64`).
    Amd64,
    /// 64-bit ARM (`aarch64` on Linux, `arm64` on macOS).
    Arm64,
}

impl Arch {
    /// Map a machine hardware name as printed by `uname -m`.
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::UnsupportedArch`] for any other machine name.
    pub fn from_machine_name(machine: &str) -> Result<Self> {
        match machine {
            "x86_64" => Ok(Self::Amd64),
            "aarch64" | "arm64" => Ok(Self::Arm64),
            other => Err(InstallerError::UnsupportedArch {
                value: other.to_owned(),
            }),
        }
    }

    /// Return the release-asset spelling of this architecture.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Amd64 => "amd64",
            Self::Arm64 => "arm64",
        }
    }
}

/// A supported `(os, arch)` pair.
///
/// # Examples
///
/// ```
/// use ralf_installer::platform::Platform;
///
/// let platform = Platform::from_uname("Darwin", "arm64").expect("supported");
/// assert_eq!(platform.to_string(), "darwin-arm64");
/// assert!(Platform::from_uname("FreeBSD", "amd64").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
    os: Os,
    arch: Arch,
}

impl Platform {
    /// Create a platform from its components.
    #[must_use]
    pub const fn new(os: Os, arch: Arch) -> Self {
        Self { os, arch }
    }

    /// Map `uname -s` and `uname -m` output onto a supported platform.
    ///
    /// The OS is checked first, so a host that is wrong on both counts
    /// reports the unsupported OS.
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::UnsupportedOs`] or
    /// [`InstallerError::UnsupportedArch`].
    pub fn from_uname(kernel: &str, machine: &str) -> Result<Self> {
        let os = Os::from_kernel_name(kernel)?;
        let arch = Arch::from_machine_name(machine)?;
        Ok(Self { os, arch })
    }

    /// Return the operating system.
    #[must_use]
    pub const fn os(&self) -> Os {
        self.os
    }

    /// Return the CPU architecture.
    #[must_use]
    pub const fn arch(&self) -> Arch {
        self.arch
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os.as_str(), self.arch.as_str())
    }
}

/// Detect the host platform by running `uname`.
///
/// # Errors
///
/// Returns [`InstallerError::PlatformProbe`] if `uname` cannot be run, or
/// an unsupported-platform error if the host is outside the supported set.
pub fn detect_platform(executor: &dyn CommandExecutor) -> Result<Platform> {
    let kernel = capture_stdout(executor, "uname", &["-s"])?;
    let os = Os::from_kernel_name(&kernel)?;
    let machine = capture_stdout(executor, "uname", &["-m"])?;
    let arch = Arch::from_machine_name(&machine)?;
    let platform = Platform::new(os, arch);
    log::debug!("detected platform {platform} from uname {kernel}/{machine}");
    Ok(platform)
}
