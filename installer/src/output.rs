//! Output formatting for the installer CLI.
//!
//! Progress, warnings, and dry-run reports are written line by line to an
//! injected writer (stderr in production) so tests can capture them.

use crate::artefact::verification::VerificationPolicy;
use crate::platform::Platform;
use camino::Utf8Path;
use std::io::Write;

/// Write a single line, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}

/// Write a `Warning:`-prefixed line.
pub fn write_warning(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    write_stderr_line(stderr, format_args!("Warning: {message}"));
}

/// Everything a dry run reports.
///
/// # Example
///
/// ```
/// use camino::Utf8PathBuf;
/// use ralf_installer::artefact::verification::VerificationPolicy;
/// use ralf_installer::output::DryRunInfo;
/// use ralf_installer::platform::{Arch, Os, Platform};
///
/// let destination = Utf8PathBuf::from("/tmp/x/bin/ralf");
/// let policy = VerificationPolicy::default();
/// let info = DryRunInfo {
///     platform: Platform::new(Os::Linux, Arch::Amd64),
///     version: "v0.1.0",
///     metadata_url: None,
///     download_url: "https://github.com/ralf-sh/ralf/releases/download/v0.1.0/ralf-linux-amd64.tar.gz",
///     destination: &destination,
///     policy: &policy,
/// };
///
/// let output = info.display_text();
/// assert!(output.contains("Dry run"));
/// assert!(output.contains("linux-amd64"));
/// ```
#[derive(Debug)]
pub struct DryRunInfo<'a> {
    /// Detected host platform.
    pub platform: Platform,
    /// Requested version, unresolved.
    pub version: &'a str,
    /// Metadata endpoint a real run would query to resolve `latest`.
    pub metadata_url: Option<&'a str>,
    /// Asset URL a real run would download.
    pub download_url: &'a str,
    /// Final location of the binary.
    pub destination: &'a Utf8Path,
    /// Checksum policy a real run would apply.
    pub policy: &'a VerificationPolicy,
}

impl DryRunInfo<'_> {
    /// Format the dry-run information for display.
    #[must_use]
    pub fn display_text(&self) -> String {
        let mut lines = vec![
            "Dry run - no files will be modified".to_owned(),
            format!("Platform: {}", self.platform),
            format!("Version: {}", self.version),
        ];

        if let Some(url) = self.metadata_url {
            lines.push(format!("Would resolve latest release from: {url}"));
        }

        lines.push(format!("Would download: {}", self.download_url));
        lines.push(format!("Checksum: {}", self.policy));
        lines.push(format!("Would install to: {}", self.destination));
        lines.join("\n")
    }
}

/// Format the message printed after a successful install.
#[must_use]
pub fn installed_message(binary: &str, version: &str, destination: &Utf8Path) -> String {
    format!("Installed {binary} {version} to {destination}")
}
