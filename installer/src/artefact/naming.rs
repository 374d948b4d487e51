//! Artefact naming policy for release archives.
//!
//! Release assets follow `<binary>-<os>-<arch>.tar.gz`, so the archive name
//! is a pure function of the host platform.

use crate::platform::Platform;
use std::fmt;

/// Name of the binary shipped in every release archive.
pub const BINARY_NAME: &str = "ralf";

/// The fixed file extension for release archives.
const ARTEFACT_EXTENSION: &str = ".tar.gz";

/// A fully-qualified release archive name.
///
/// # Examples
///
/// ```
/// use ralf_installer::artefact::naming::ArtefactName;
/// use ralf_installer::platform::{Arch, Os, Platform};
///
/// let name = ArtefactName::new(Platform::new(Os::Linux, Arch::Amd64));
/// assert_eq!(name.to_string(), "ralf-linux-amd64.tar.gz");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtefactName {
    platform: Platform,
}

impl ArtefactName {
    /// Create the archive name for `platform`.
    #[must_use]
    pub const fn new(platform: Platform) -> Self {
        Self { platform }
    }

    /// Return the platform component.
    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    /// Return the name of the binary inside the archive.
    #[must_use]
    pub const fn binary(&self) -> &'static str {
        BINARY_NAME
    }

    /// Return the archive filename.
    #[must_use]
    pub fn filename(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ArtefactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{BINARY_NAME}-{}{ARTEFACT_EXTENSION}", self.platform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{Arch, Os};
    use rstest::rstest;

    #[rstest]
    #[case::linux_amd64(Os::Linux, Arch::Amd64, "ralf-linux-amd64.tar.gz")]
    #[case::linux_arm64(Os::Linux, Arch::Arm64, "ralf-linux-arm64.tar.gz")]
    #[case::darwin_amd64(Os::Darwin, Arch::Amd64, "ralf-darwin-amd64.tar.gz")]
    #[case::darwin_arm64(Os::Darwin, Arch::Arm64, "ralf-darwin-arm64.tar.gz")]
    fn filename_for_platform(#[case] os: Os, #[case] arch: Arch, #[case] expected: &str) {
        let name = ArtefactName::new(Platform::new(os, arch));
        assert_eq!(name.filename(), expected);
    }

    #[test]
    fn binary_is_fixed() {
        let name = ArtefactName::new(Platform::new(Os::Darwin, Arch::Arm64));
        assert_eq!(name.binary(), "ralf");
    }
}
