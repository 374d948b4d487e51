//! CLI argument definitions for the ralf installer.
//!
//! This module defines the command-line interface using clap. It is separated
//! from the main entrypoint to keep the binary small and focused on
//! orchestration. Flags take precedence over the `VERSION` and `PREFIX`
//! environment variables, which take precedence over the built-in defaults.

use crate::artefact::download::{
    DEFAULT_API_BASE, DEFAULT_DOWNLOAD_BASE, DEFAULT_REPOSITORY, ReleaseSource,
};
use crate::artefact::sha256_digest::Sha256Digest;
use crate::dirs::{BaseDirs, resolve_prefix};
use crate::error::Result;
use crate::install::InstallRequest;
use crate::release::{LATEST, ReleaseVersion};
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

/// Install or remove the ralf binary from GitHub releases.
#[derive(Parser, Debug)]
#[command(name = "ralf-installer")]
#[command(version, about)]
#[command(long_about = concat!(
    "Install or remove the ralf binary from GitHub releases.\n\n",
    "The installer detects the host platform, downloads the matching release ",
    "archive, optionally verifies its SHA-256 digest, and places the binary in ",
    "<prefix>/bin. Supported platforms are Linux and macOS on x86_64 and arm64.",
))]
#[command(after_help = concat!(
    "ENVIRONMENT:\n",
    "  VERSION    Release to install when --version is not given [default: latest]\n",
    "  PREFIX     Installation prefix when --prefix is not given [default: ~/.local]\n",
    "  RUST_LOG   Diagnostic log filter [default: warn]\n\n",
    "EXAMPLES:\n",
    "  Install the latest release into ~/.local/bin:\n",
    "    $ ralf-installer install\n\n",
    "  Install a pinned release and verify it:\n",
    "    $ ralf-installer install --version v0.1.0 --sha256 <HEX>\n\n",
    "  Preview without downloading:\n",
    "    $ ralf-installer install --dry-run --prefix /tmp/x\n\n",
    "  Remove the binary:\n",
    "    $ ralf-installer uninstall\n",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Download and install ralf.
    Install(InstallArgs),

    /// Remove an installed ralf binary.
    Uninstall(UninstallArgs),
}

/// Arguments for the install command.
#[derive(Parser, Debug, Clone)]
pub struct InstallArgs {
    /// Release tag to install, or `latest`.
    #[arg(long, value_name = "VERSION", env = "VERSION", default_value = LATEST)]
    pub version: String,

    /// Installation prefix; the binary goes to <DIR>/bin [default: ~/.local].
    #[arg(long, value_name = "DIR", env = "PREFIX")]
    pub prefix: Option<Utf8PathBuf>,

    /// Expected SHA-256 of the release archive; must be exactly 64 hex
    /// characters, anything shorter is rejected before downloading.
    #[arg(long, value_name = "HEX", value_parser = Sha256Digest::parse_user_input)]
    pub sha256: Option<Sha256Digest>,

    /// Show what would be done without downloading or writing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Suppress progress output (warnings and errors still shown).
    #[arg(short, long)]
    pub quiet: bool,

    /// GitHub repository publishing the releases.
    #[arg(
        long,
        value_name = "OWNER/NAME",
        env = "RALF_REPOSITORY",
        default_value = DEFAULT_REPOSITORY,
        hide = true
    )]
    pub repository: String,

    /// Base URL of the GitHub REST API.
    #[arg(
        long,
        value_name = "URL",
        env = "RALF_GITHUB_API_URL",
        default_value = DEFAULT_API_BASE,
        hide = true
    )]
    pub github_api_url: String,

    /// Base URL serving release assets.
    #[arg(
        long,
        value_name = "URL",
        env = "RALF_GITHUB_DOWNLOAD_URL",
        default_value = DEFAULT_DOWNLOAD_BASE,
        hide = true
    )]
    pub github_download_url: String,
}

/// Arguments for the uninstall command.
#[derive(Parser, Debug, Clone)]
pub struct UninstallArgs {
    /// Installation prefix holding bin/ralf [default: ~/.local].
    #[arg(long, value_name = "DIR", env = "PREFIX")]
    pub prefix: Option<Utf8PathBuf>,

    /// Suppress progress output (warnings and errors still shown).
    #[arg(short, long)]
    pub quiet: bool,
}

impl InstallArgs {
    /// Build the install request, falling back to `<home>/.local` when no
    /// prefix was given.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::InstallerError::HomeDirUnavailable`] when no
    /// prefix was given and the home directory is unknown.
    ///
    /// # Examples
    ///
    /// ```
    /// use clap::Parser;
    /// use ralf_installer::cli::{Cli, Command};
    /// use ralf_installer::dirs::SystemBaseDirs;
    /// use ralf_installer::release::ReleaseVersion;
    ///
    /// let cli = Cli::parse_from([
    ///     "ralf-installer", "install", "--version", "v0.1.0", "--prefix", "/opt/ralf",
    /// ]);
    /// let Command::Install(args) = cli.command else { unreachable!() };
    /// let request = args.to_request(&SystemBaseDirs).expect("explicit prefix");
    /// assert_eq!(request.version, ReleaseVersion::Tag("v0.1.0".to_owned()));
    /// assert_eq!(request.prefix, "/opt/ralf");
    /// ```
    pub fn to_request(&self, dirs: &dyn BaseDirs) -> Result<InstallRequest> {
        Ok(InstallRequest {
            version: ReleaseVersion::from(self.version.trim()),
            prefix: resolve_prefix(self.prefix.clone(), dirs)?,
            expected_checksum: self.sha256.clone(),
            dry_run: self.dry_run,
            quiet: self.quiet,
        })
    }

    /// Return the release source selected by the (hidden) override flags.
    #[must_use]
    pub fn release_source(&self) -> ReleaseSource {
        ReleaseSource::new(
            &self.repository,
            &self.github_api_url,
            &self.github_download_url,
        )
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
