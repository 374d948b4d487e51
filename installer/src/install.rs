//! The install workflow.
//!
//! Runs the linear pipeline: detect platform → resolve version → download →
//! verify → extract → place. Every step either completes or aborts the run;
//! nothing is retried and nothing already written under the prefix is rolled
//! back. A dry run stops after platform detection and reports what a real run
//! would do, without touching the network or the filesystem.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::artefact::download::{ArtefactDownloader, HttpDownloader, ReleaseSource};
use crate::artefact::extraction::{ArtefactExtractor, GzipExtractor, locate_binary};
use crate::artefact::naming::{ArtefactName, BINARY_NAME};
use crate::artefact::sha256_digest::Sha256Digest;
use crate::artefact::verification::{
    BundledSha256, DigestProvider, VerificationOutcome, VerificationPolicy, verify_artefact,
};
use crate::command::{CommandExecutor, SystemCommandExecutor};
use crate::error::{InstallerError, Result};
use crate::output::{DryRunInfo, installed_message, write_stderr_line, write_warning};
use crate::platform::{Platform, detect_platform};
use crate::release::{ReleaseVersion, resolve_version};
use crate::scratch::ScratchDir;

/// Directory under the prefix that receives the binary.
const BIN_SUBDIR: &str = "bin";

/// Mode applied to the installed binary.
#[cfg(unix)]
const EXECUTABLE_MODE: u32 = 0o755;

/// Warning printed when the artefact cannot be hashed on this host.
pub const CHECKSUM_SKIPPED_WARNING: &str =
    "no SHA-256 implementation available; skipping checksum verification";

/// A fully resolved install request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    /// Release to install.
    pub version: ReleaseVersion,
    /// Installation root; the binary lands in `<prefix>/bin`.
    pub prefix: Utf8PathBuf,
    /// Digest the downloaded archive must match, if any.
    pub expected_checksum: Option<Sha256Digest>,
    /// Report the plan without downloading or writing anything.
    pub dry_run: bool,
    /// Suppress progress output (warnings and errors still shown).
    pub quiet: bool,
}

/// The collaborators an install run talks to.
pub struct InstallContext<'a> {
    /// Where releases are published.
    pub source: &'a ReleaseSource,
    /// Runs `uname` for platform detection.
    pub executor: &'a dyn CommandExecutor,
    /// Fetches release metadata and assets.
    pub downloader: &'a dyn ArtefactDownloader,
    /// Unpacks the downloaded archive.
    pub extractor: &'a dyn ArtefactExtractor,
    /// Hashes the downloaded archive.
    pub digest: &'a dyn DigestProvider,
}

/// How an install run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// A dry run reported its plan.
    DryRun {
        /// Host platform.
        platform: Platform,
        /// Asset URL a real run would fetch.
        download_url: String,
    },
    /// The binary was installed.
    Installed {
        /// Resolved release tag.
        version: String,
        /// Location of the installed binary.
        path: Utf8PathBuf,
    },
}

/// Return `<prefix>/bin/ralf`.
#[must_use]
pub fn installed_binary_path(prefix: &Utf8Path) -> Utf8PathBuf {
    prefix.join(BIN_SUBDIR).join(BINARY_NAME)
}

/// Install using the production HTTP, extraction, and hashing stack.
///
/// # Errors
///
/// See [`install_with`].
pub fn install(
    request: &InstallRequest,
    source: &ReleaseSource,
    stderr: &mut dyn Write,
) -> Result<InstallOutcome> {
    let downloader = HttpDownloader::new(source.clone());
    let context = InstallContext {
        source,
        executor: &SystemCommandExecutor,
        downloader: &downloader,
        extractor: &GzipExtractor,
        digest: &BundledSha256,
    };
    install_with(request, &context, stderr)
}

/// Install with injected collaborators.
///
/// # Errors
///
/// Returns the first failure: unsupported platform, unresolvable `latest`,
/// download failure, checksum mismatch, extraction failure, a missing
/// binary in the archive, or a failure writing under the prefix.
pub fn install_with(
    request: &InstallRequest,
    context: &InstallContext<'_>,
    stderr: &mut dyn Write,
) -> Result<InstallOutcome> {
    let platform = detect_platform(context.executor)?;
    let artefact = ArtefactName::new(platform);
    let policy = VerificationPolicy::new(request.expected_checksum.clone());

    if request.dry_run {
        return Ok(report_dry_run(request, context.source, artefact, &policy, stderr));
    }

    progress(request.quiet, stderr, format!("Detected platform {platform}"));
    if request.version == ReleaseVersion::Latest && !request.quiet {
        write_stderr_line(
            stderr,
            format!(
                "Resolving latest release of {}...",
                context.source.repository()
            ),
        );
    }
    let version = resolve_version(&request.version, context.downloader)?;

    let filename = artefact.filename();
    let scratch = ScratchDir::create()?;
    let archive_path = scratch.path().join(&filename);

    progress(
        request.quiet,
        stderr,
        format!(
            "Downloading {}...",
            context.source.asset_url(&version, &filename)
        ),
    );
    context
        .downloader
        .download_archive(&version, &filename, &archive_path)?;

    if policy.require_checksum() {
        progress(request.quiet, stderr, "Verifying checksum...");
    }
    match verify_artefact(&policy, context.digest, &archive_path)? {
        VerificationOutcome::Verified => progress(request.quiet, stderr, "Checksum verified."),
        VerificationOutcome::Skipped => write_warning(stderr, CHECKSUM_SKIPPED_WARNING),
        VerificationOutcome::NotRequested => {}
    }

    progress(request.quiet, stderr, format!("Extracting {filename}..."));
    let unpack_dir = scratch.path().join("unpacked");
    fs::create_dir_all(&unpack_dir)?;
    let extracted = context.extractor.extract(&archive_path, &unpack_dir)?;
    let binary = locate_binary(&extracted, artefact.binary()).ok_or_else(|| {
        InstallerError::BinaryNotInArchive {
            archive: filename.clone(),
            binary: BINARY_NAME,
        }
    })?;

    let bin_dir = request.prefix.join(BIN_SUBDIR);
    let path = place_binary(&unpack_dir.join(binary), &bin_dir, artefact.binary())?;

    progress(
        request.quiet,
        stderr,
        installed_message(artefact.binary(), &version, &path),
    );
    Ok(InstallOutcome::Installed { version, path })
}

/// Print the dry-run report and build its outcome.
fn report_dry_run(
    request: &InstallRequest,
    source: &ReleaseSource,
    artefact: ArtefactName,
    policy: &VerificationPolicy,
    stderr: &mut dyn Write,
) -> InstallOutcome {
    let filename = artefact.filename();
    let (metadata_url, download_url) = match request.version.tag() {
        Some(tag) => (None, source.asset_url(tag, &filename)),
        None => (
            Some(source.latest_release_url()),
            source.latest_asset_url(&filename),
        ),
    };
    let destination = installed_binary_path(&request.prefix);
    let version = request.version.to_string();

    let info = DryRunInfo {
        platform: artefact.platform(),
        version: &version,
        metadata_url: metadata_url.as_deref(),
        download_url: &download_url,
        destination: &destination,
        policy,
    };
    write_stderr_line(stderr, info.display_text());

    InstallOutcome::DryRun {
        platform: artefact.platform(),
        download_url,
    }
}

/// Copy `source` to `<bin_dir>/<name>` and mark it executable.
///
/// The copy goes to a hidden staging file in `bin_dir` first and is renamed
/// into place, so a running `ralf` is replaced rather than overwritten.
///
/// # Errors
///
/// Returns [`InstallerError::InstallFailed`] naming the path that could not
/// be created or written.
pub fn place_binary(source: &Path, bin_dir: &Utf8Path, name: &str) -> Result<Utf8PathBuf> {
    fs::create_dir_all(bin_dir).map_err(|e| install_failed(bin_dir, &e))?;

    let destination = bin_dir.join(name);
    let staging = bin_dir.join(format!(".{name}.partial"));
    fs::copy(source, &staging).map_err(|e| install_failed(&staging, &e))?;

    if let Err(e) = set_executable(&staging).and_then(|()| fs::rename(&staging, &destination)) {
        if fs::remove_file(&staging).is_err() {
            // Leave the staging file; the original error is more useful.
        }
        return Err(install_failed(&destination, &e));
    }

    log::debug!("placed {} at {destination}", source.display());
    Ok(destination)
}

#[cfg(unix)]
fn set_executable(path: &Utf8Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_mode(EXECUTABLE_MODE);
    fs::set_permissions(path, permissions)
}

#[cfg(not(unix))]
fn set_executable(_path: &Utf8Path) -> std::io::Result<()> {
    Ok(())
}

fn install_failed(path: &Utf8Path, err: &std::io::Error) -> InstallerError {
    InstallerError::InstallFailed {
        path: path.to_owned(),
        reason: err.to_string(),
    }
}

fn progress(quiet: bool, stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if !quiet {
        write_stderr_line(stderr, message);
    }
}

#[cfg(test)]
#[path = "install_tests.rs"]
mod tests;
