//! Error types for the ralf installer CLI.
//!
//! This module defines semantic error variants for every fatal condition the
//! install and uninstall flows can hit. Each message names the input that
//! failed (a URL, a path, a digest) so the user can act on it.

use crate::artefact::download::DownloadError;
use crate::artefact::extraction::ExtractionError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while installing or uninstalling `ralf`.
#[derive(Debug, Error)]
pub enum InstallerError {
    /// The host kernel is not one of the supported operating systems.
    #[error("unsupported OS: {value}")]
    UnsupportedOs {
        /// The kernel name reported by the host.
        value: String,
    },

    /// The host machine hardware name is not a supported architecture.
    #[error("unsupported architecture: {value}")]
    UnsupportedArch {
        /// The machine hardware name reported by the host.
        value: String,
    },

    /// The host could not be probed for its kernel or machine name.
    #[error("platform detection failed: {reason}")]
    PlatformProbe {
        /// Description of the probe failure.
        reason: String,
    },

    /// The `latest` sentinel could not be resolved to a release tag.
    #[error("could not determine latest version: {reason}")]
    LatestVersion {
        /// Description of why resolution failed.
        reason: String,
    },

    /// The release artefact could not be downloaded.
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// The downloaded artefact does not match the expected digest.
    #[error("checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// Digest supplied by the caller.
        expected: String,
        /// Digest computed from the downloaded file.
        actual: String,
    },

    /// Hashing the downloaded artefact failed.
    #[error("checksum computation failed for {path}: {source}")]
    Digest {
        /// The file being hashed.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The release archive could not be unpacked.
    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    /// The release archive unpacked cleanly but holds no binary.
    #[error("archive {archive} does not contain {binary}")]
    BinaryNotInArchive {
        /// The archive file name.
        archive: String,
        /// The binary name that was expected.
        binary: &'static str,
    },

    /// The binary could not be placed under the prefix.
    #[error("failed to install to {path}: {reason}")]
    InstallFailed {
        /// Destination that could not be written.
        path: Utf8PathBuf,
        /// Description of the underlying I/O error.
        reason: String,
    },

    /// The installed binary could not be removed.
    #[error("failed to remove {path}: {reason}")]
    RemoveFailed {
        /// Path of the binary that could not be removed.
        path: Utf8PathBuf,
        /// Description of the underlying I/O error.
        reason: String,
    },

    /// No prefix was given and the home directory is unknown.
    #[error("could not determine home directory ({reason}); pass --prefix or set PREFIX")]
    HomeDirUnavailable {
        /// Description of why the home directory is unavailable.
        reason: String,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Test stub received an unexpected or mismatched command invocation.
    #[cfg(any(test, feature = "test-support"))]
    #[error("stub mismatch: {message}")]
    StubMismatch {
        /// Description of what was expected versus what was received.
        message: String,
    },
}

/// Result type alias using [`InstallerError`].
pub type Result<T> = std::result::Result<T, InstallerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_mismatch_reports_both_digests() {
        let err = InstallerError::ChecksumMismatch {
            expected: "deadbeef".to_owned(),
            actual: "cafebabe".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("deadbeef"));
        assert!(msg.contains("cafebabe"));
    }

    #[test]
    fn latest_version_error_uses_fixed_prefix() {
        let err = InstallerError::LatestVersion {
            reason: "HTTP 500".to_owned(),
        };
        assert!(
            err.to_string()
                .starts_with("could not determine latest version")
        );
    }

    #[test]
    fn download_error_is_transparent_and_names_url() {
        let err = InstallerError::from(DownloadError::NotFound {
            url: "https://example.test/ralf.tar.gz".to_owned(),
        });
        assert_eq!(
            err.to_string(),
            "artefact not found: https://example.test/ralf.tar.gz"
        );
    }

    #[test]
    fn digest_error_preserves_source() {
        let err = InstallerError::Digest {
            path: "/tmp/ralf.tar.gz".to_owned(),
            source: std::io::Error::other("disk on fire"),
        };
        assert!(err.to_string().contains("/tmp/ralf.tar.gz"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn home_dir_error_suggests_prefix() {
        let err = InstallerError::HomeDirUnavailable {
            reason: "HOME unset".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("--prefix"));
        assert!(msg.contains("PREFIX"));
    }
}
