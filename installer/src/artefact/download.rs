//! Release metadata and artefact download over HTTP.
//!
//! Provides a trait-based abstraction for querying the latest GitHub release
//! and downloading release assets, enabling dependency injection for
//! testing. [`ReleaseSource`] owns URL construction so dry runs can report
//! exactly what a real run would fetch.

use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

/// The GitHub repository owner/name that publishes `ralf` releases.
pub const DEFAULT_REPOSITORY: &str = "ralf-sh/ralf";

/// Base URL of the GitHub REST API.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Base URL that serves release assets.
pub const DEFAULT_DOWNLOAD_BASE: &str = "https://github.com";

/// Limit on establishing a connection.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Limit on waiting for response headers once the request is sent.
///
/// Bodies are never capped, so large archives on slow links still complete.
const RESPONSE_TIMEOUT: Duration = Duration::from_secs(30);

/// Media type requested from the GitHub REST API.
const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// User agent sent with every request; GitHub rejects anonymous clients.
const USER_AGENT: &str = concat!("ralf-installer/", env!("CARGO_PKG_VERSION"));

/// Where releases are published.
///
/// # Examples
///
/// ```
/// use ralf_installer::artefact::download::ReleaseSource;
///
/// let source = ReleaseSource::default();
/// assert_eq!(
///     source.asset_url("v0.1.0", "ralf-linux-amd64.tar.gz"),
///     "https://github.com/ralf-sh/ralf/releases/download/v0.1.0/ralf-linux-amd64.tar.gz"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSource {
    repository: String,
    api_base: String,
    download_base: String,
}

impl ReleaseSource {
    /// Create a source; trailing slashes on the base URLs are ignored.
    #[must_use]
    pub fn new(repository: &str, api_base: &str, download_base: &str) -> Self {
        Self {
            repository: repository.trim_matches('/').to_owned(),
            api_base: api_base.trim_end_matches('/').to_owned(),
            download_base: download_base.trim_end_matches('/').to_owned(),
        }
    }

    /// Return the `owner/name` repository slug.
    #[must_use]
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// URL of the "latest release" metadata endpoint.
    #[must_use]
    pub fn latest_release_url(&self) -> String {
        format!("{}/repos/{}/releases/latest", self.api_base, self.repository)
    }

    /// URL of a release asset for an explicit tag.
    #[must_use]
    pub fn asset_url(&self, version: &str, filename: &str) -> String {
        format!(
            "{}/{}/releases/download/{version}/{filename}",
            self.download_base, self.repository
        )
    }

    /// URL GitHub redirects to the asset of the newest release.
    ///
    /// Only used for reporting in dry runs, which never resolve `latest`.
    #[must_use]
    pub fn latest_asset_url(&self, filename: &str) -> String {
        format!(
            "{}/{}/releases/latest/download/{filename}",
            self.download_base, self.repository
        )
    }
}

impl Default for ReleaseSource {
    fn default() -> Self {
        Self::new(DEFAULT_REPOSITORY, DEFAULT_API_BASE, DEFAULT_DOWNLOAD_BASE)
    }
}

/// Trait for fetching release metadata and assets.
///
/// Abstractions allow tests to mock HTTP behaviour without network access.
#[cfg_attr(test, mockall::automock)]
pub trait ArtefactDownloader {
    /// Fetch the JSON body describing the latest release.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server answers with a
    /// non-success status.
    fn fetch_latest_release(&self) -> Result<String, DownloadError>;

    /// Download the asset `filename` of release `version` into `dest`.
    ///
    /// # Errors
    ///
    /// Returns an error if the download or file write fails.
    fn download_archive(&self, version: &str, filename: &str, dest: &Path)
    -> Result<(), DownloadError>;
}

/// Errors arising from HTTP operations.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// HTTP request failed.
    #[error("download failed for {url}: {reason}")]
    HttpError {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// The requested resource was not found (HTTP 404).
    #[error("artefact not found: {url}")]
    NotFound {
        /// The URL that returned 404.
        url: String,
    },

    /// I/O error writing the downloaded file.
    #[error("I/O error writing download: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP-based downloader using `ureq`.
#[derive(Debug, Clone, Default)]
pub struct HttpDownloader {
    source: ReleaseSource,
}

impl HttpDownloader {
    /// Create a downloader for `source`.
    #[must_use]
    pub const fn new(source: ReleaseSource) -> Self {
        Self { source }
    }
}

impl ArtefactDownloader for HttpDownloader {
    fn fetch_latest_release(&self) -> Result<String, DownloadError> {
        let url = self.source.latest_release_url();
        log::debug!("querying {url}");
        download_text(&url)
    }

    fn download_archive(
        &self,
        version: &str,
        filename: &str,
        dest: &Path,
    ) -> Result<(), DownloadError> {
        let url = self.source.asset_url(version, filename);
        log::debug!("downloading {url} to {}", dest.display());
        download_to_file(&url, dest)
    }
}

/// Download a URL and return the body as a string.
fn download_text(url: &str) -> Result<String, DownloadError> {
    let response = http_agent()
        .get(url)
        .header("Accept", GITHUB_ACCEPT)
        .header("User-Agent", USER_AGENT)
        .call()
        .map_err(|e| map_ureq_error(url, &e))?;
    response
        .into_body()
        .read_to_string()
        .map_err(|e| DownloadError::HttpError {
            url: url.to_owned(),
            reason: e.to_string(),
        })
}

/// Download a URL and write the body to a file.
fn download_to_file(url: &str, dest: &Path) -> Result<(), DownloadError> {
    let response = http_agent()
        .get(url)
        .header("User-Agent", USER_AGENT)
        .call()
        .map_err(|e| map_ureq_error(url, &e))?;
    let mut file = std::fs::File::create(dest)?;
    std::io::copy(&mut response.into_body().as_reader(), &mut file).map_err(|e| {
        DownloadError::HttpError {
            url: url.to_owned(),
            reason: e.to_string(),
        }
    })?;
    Ok(())
}

/// Shared `ureq` agent with request timeout configuration.
fn http_agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| ureq::Agent::new_with_config(agent_config()))
}

/// Connection and header limits only; there is no whole-call deadline.
fn agent_config() -> ureq::config::Config {
    ureq::Agent::config_builder()
        .timeout_connect(Some(CONNECT_TIMEOUT))
        .timeout_recv_response(Some(RESPONSE_TIMEOUT))
        .build()
}

/// Map a ureq error to a [`DownloadError`].
fn map_ureq_error(url: &str, err: &ureq::Error) -> DownloadError {
    match err {
        ureq::Error::StatusCode(404) => DownloadError::NotFound {
            url: url.to_owned(),
        },
        other => DownloadError::HttpError {
            url: url.to_owned(),
            reason: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_bounds_connect_and_headers_but_not_the_body() {
        let timeouts = agent_config().timeouts();
        assert_eq!(timeouts.global, None);
        assert_eq!(timeouts.recv_body, None);
        assert_eq!(timeouts.connect, Some(CONNECT_TIMEOUT));
        assert_eq!(timeouts.recv_response, Some(RESPONSE_TIMEOUT));
    }

    #[test]
    fn asset_url_contains_repo_tag_and_filename() {
        let url = ReleaseSource::default().asset_url("v0.1.0", "ralf-linux-amd64.tar.gz");
        assert_eq!(
            url,
            "https://github.com/ralf-sh/ralf/releases/download/v0.1.0/ralf-linux-amd64.tar.gz"
        );
    }

    #[test]
    fn latest_release_url_targets_api() {
        let url = ReleaseSource::default().latest_release_url();
        assert_eq!(url, "https://api.github.com/repos/ralf-sh/ralf/releases/latest");
    }

    #[test]
    fn latest_asset_url_uses_latest_redirect() {
        let url = ReleaseSource::default().latest_asset_url("ralf-darwin-arm64.tar.gz");
        assert!(url.ends_with("/releases/latest/download/ralf-darwin-arm64.tar.gz"));
    }

    #[test]
    fn new_strips_trailing_slashes() {
        let source = ReleaseSource::new("/me/ralf/", "http://127.0.0.1:9/", "http://mirror/");
        assert_eq!(source.repository(), "me/ralf");
        assert_eq!(
            source.latest_release_url(),
            "http://127.0.0.1:9/repos/me/ralf/releases/latest"
        );
        assert_eq!(
            source.asset_url("v1", "a.tar.gz"),
            "http://mirror/me/ralf/releases/download/v1/a.tar.gz"
        );
    }

    #[test]
    fn map_ureq_error_maps_404_to_not_found() {
        let err = ureq::Error::StatusCode(404);
        let mapped = map_ureq_error("https://example.test/asset", &err);
        assert!(matches!(mapped, DownloadError::NotFound { .. }));
    }

    #[test]
    fn map_ureq_error_maps_other_status_to_http_error() {
        let err = ureq::Error::StatusCode(500);
        let mapped = map_ureq_error("https://example.test/asset", &err);
        assert!(matches!(mapped, DownloadError::HttpError { .. }));
        assert!(mapped.to_string().contains("https://example.test/asset"));
    }
}
