//! Release version resolution.
//!
//! The `latest` sentinel is resolved with a single query against the GitHub
//! "latest release" endpoint; explicit tags pass through untouched and are
//! only proven to exist when their asset is downloaded.

use crate::artefact::download::ArtefactDownloader;
use crate::error::{InstallerError, Result};
use serde::Deserialize;
use std::fmt;

/// The sentinel that selects the newest published release.
pub const LATEST: &str = "latest";

/// A requested release version.
///
/// # Examples
///
/// ```
/// use ralf_installer::release::ReleaseVersion;
///
/// assert_eq!(ReleaseVersion::from("latest"), ReleaseVersion::Latest);
/// assert_eq!(
///     ReleaseVersion::from("v0.1.0"),
///     ReleaseVersion::Tag("v0.1.0".to_owned())
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseVersion {
    /// Resolve the newest release at install time.
    Latest,
    /// A specific release tag.
    Tag(String),
}

impl ReleaseVersion {
    /// Return the explicit tag, or `None` for [`ReleaseVersion::Latest`].
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Latest => None,
            Self::Tag(tag) => Some(tag),
        }
    }
}

impl From<&str> for ReleaseVersion {
    fn from(value: &str) -> Self {
        if value == LATEST {
            Self::Latest
        } else {
            Self::Tag(value.to_owned())
        }
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => f.write_str(LATEST),
            Self::Tag(tag) => f.write_str(tag),
        }
    }
}

/// The subset of the GitHub release payload the installer reads.
#[derive(Debug, Deserialize)]
struct LatestRelease {
    tag_name: Option<String>,
}

/// Extract `tag_name` from a GitHub release JSON document.
///
/// # Errors
///
/// Returns [`InstallerError::LatestVersion`] when the body is not JSON or
/// carries no non-empty `tag_name`.
pub fn parse_latest_tag(body: &str) -> Result<String> {
    let release: LatestRelease =
        serde_json::from_str(body).map_err(|e| InstallerError::LatestVersion {
            reason: format!("invalid release metadata: {e}"),
        })?;
    release
        .tag_name
        .map(|tag| tag.trim().to_owned())
        .filter(|tag| !tag.is_empty())
        .ok_or_else(|| InstallerError::LatestVersion {
            reason: "release metadata has no tag_name".to_owned(),
        })
}

/// Resolve `version` to a concrete release tag.
///
/// # Errors
///
/// Returns [`InstallerError::LatestVersion`] if `latest` was requested and
/// the metadata query fails or cannot be parsed. There is no retry.
pub fn resolve_version(
    version: &ReleaseVersion,
    downloader: &dyn ArtefactDownloader,
) -> Result<String> {
    match version {
        ReleaseVersion::Tag(tag) => Ok(tag.clone()),
        ReleaseVersion::Latest => {
            let body = downloader
                .fetch_latest_release()
                .map_err(|e| InstallerError::LatestVersion {
                    reason: e.to_string(),
                })?;
            let tag = parse_latest_tag(&body)?;
            log::debug!("latest release resolved to {tag}");
            Ok(tag)
        }
    }
}
