//! Checksum verification for downloaded artefacts.
//!
//! Verification is opt-in: it runs only when the caller supplies an expected
//! digest. Hashing goes through [`DigestProvider`] so that a provider unable
//! to hash on this host leads to a warning and an unverified install rather
//! than a hard failure. The bundled provider always hashes.

use super::sha256_digest::Sha256Digest;
use crate::error::{InstallerError, Result};
use std::fmt;
use std::path::Path;

/// Computes SHA-256 digests of files on disk.
#[cfg_attr(test, mockall::automock)]
pub trait DigestProvider {
    /// Hash the file at `path`.
    ///
    /// Returns `Ok(None)` when this provider cannot hash on the current host.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised while reading the file.
    fn sha256(&self, path: &Path) -> std::io::Result<Option<Sha256Digest>>;
}

/// In-process SHA-256 using the `sha2` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledSha256;

impl DigestProvider for BundledSha256 {
    fn sha256(&self, path: &Path) -> std::io::Result<Option<Sha256Digest>> {
        Sha256Digest::of_file(path).map(Some)
    }
}

/// Policy governing how a downloaded artefact is verified before use.
///
/// # Examples
///
/// ```
/// use ralf_installer::artefact::verification::VerificationPolicy;
///
/// let policy = VerificationPolicy::default();
/// assert!(!policy.require_checksum());
/// assert_eq!(policy.to_string(), "checksum verification disabled");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationPolicy {
    expected: Option<Sha256Digest>,
}

impl VerificationPolicy {
    /// Create a policy that verifies against `expected` when present.
    #[must_use]
    pub const fn new(expected: Option<Sha256Digest>) -> Self {
        Self { expected }
    }

    /// Return whether checksum verification is required.
    #[must_use]
    pub const fn require_checksum(&self) -> bool {
        self.expected.is_some()
    }

    /// Return the digest the artefact must match, if any.
    #[must_use]
    pub const fn expected(&self) -> Option<&Sha256Digest> {
        self.expected.as_ref()
    }
}

impl fmt::Display for VerificationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.expected {
            Some(digest) => write!(f, "verify SHA-256 {digest}"),
            None => write!(f, "checksum verification disabled"),
        }
    }
}

/// What happened when a policy was applied to an artefact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// No expected digest was supplied.
    NotRequested,
    /// The artefact matched the expected digest.
    Verified,
    /// No provider could hash the artefact; it was accepted unverified.
    Skipped,
}

/// Apply `policy` to the file at `archive_path`.
///
/// # Errors
///
/// Returns [`InstallerError::ChecksumMismatch`] when the computed digest
/// differs from the expected one, or [`InstallerError::Digest`] when the
/// file cannot be read.
pub fn verify_artefact(
    policy: &VerificationPolicy,
    provider: &dyn DigestProvider,
    archive_path: &Path,
) -> Result<VerificationOutcome> {
    let Some(expected) = policy.expected() else {
        return Ok(VerificationOutcome::NotRequested);
    };

    let computed = provider
        .sha256(archive_path)
        .map_err(|source| InstallerError::Digest {
            path: archive_path.display().to_string(),
            source,
        })?;

    let Some(actual) = computed else {
        return Ok(VerificationOutcome::Skipped);
    };

    log::debug!("computed SHA-256 {actual} for {}", archive_path.display());
    if actual != *expected {
        return Err(InstallerError::ChecksumMismatch {
            expected: expected.to_string(),
            actual: actual.into_inner(),
        });
    }
    Ok(VerificationOutcome::Verified)
}
