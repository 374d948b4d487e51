//! Archive extraction for release artefacts.
//!
//! Extracts `.tar.gz` archives to a target directory with path traversal
//! protection to prevent zip-slip attacks. Link entries are refused
//! outright, so no later entry can be written through them.

use flate2::read::GzDecoder;
use std::path::{Component, Path, PathBuf};

/// Trait for extracting artefact archives, enabling test mocking.
///
/// # Examples
///
/// ```
/// use ralf_installer::artefact::extraction::GzipExtractor;
///
/// let extractor = GzipExtractor;
/// // Use extractor.extract(archive_path, dest_dir) in production
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait ArtefactExtractor {
    /// Extract the archive at `archive_path` into `dest_dir`.
    ///
    /// Returns the archive-relative paths of the regular files that were
    /// extracted, in archive order.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::PathTraversal`] if any entry
    /// attempts to escape the destination directory.
    /// Returns [`ExtractionError::LinkEntry`] if the archive holds a
    /// symbolic or hard link.
    /// Returns [`ExtractionError::EmptyArchive`] if no files are found.
    /// Returns [`ExtractionError::Io`] on I/O or decoding failures.
    fn extract(&self, archive_path: &Path, dest_dir: &Path)
    -> Result<Vec<PathBuf>, ExtractionError>;
}

/// Errors arising from archive extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// I/O error during extraction.
    #[error("extraction I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A path in the archive attempts to traverse outside the destination.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The offending path from the archive entry.
        path: String,
    },

    /// The archive holds a symbolic or hard link.
    #[error("archive entry is a link: {path}")]
    LinkEntry {
        /// The link's path within the archive.
        path: String,
    },

    /// The archive contains no files.
    #[error("archive contains no files")]
    EmptyArchive,
}

/// Default extractor using the `tar` and `flate2` crates.
///
/// Validates each entry path before extraction to guard against
/// path traversal attacks (zip-slip).
#[derive(Debug, Clone, Copy, Default)]
pub struct GzipExtractor;

impl ArtefactExtractor for GzipExtractor {
    fn extract(
        &self,
        archive_path: &Path,
        dest_dir: &Path,
    ) -> Result<Vec<PathBuf>, ExtractionError> {
        let file = std::fs::File::open(archive_path)?;
        let mut archive = tar::Archive::new(GzDecoder::new(file));
        let mut extracted = Vec::new();

        for entry_result in archive.entries()? {
            let mut entry = entry_result?;
            let entry_path = entry.path()?.into_owned();

            validate_entry_path(&entry_path)?;

            let entry_type = entry.header().entry_type();
            if entry_type.is_symlink() || entry_type.is_hard_link() {
                return Err(ExtractionError::LinkEntry {
                    path: entry_path.display().to_string(),
                });
            }

            // `unpack_in` also refuses to write through a parent that
            // resolves outside `dest_dir`.
            if !entry.unpack_in(dest_dir)? {
                return Err(ExtractionError::PathTraversal {
                    path: entry_path.display().to_string(),
                });
            }

            if entry_type.is_file() {
                log::trace!("extracted {}", entry_path.display());
                extracted.push(entry_path);
            }
        }

        if extracted.is_empty() {
            return Err(ExtractionError::EmptyArchive);
        }

        Ok(extracted)
    }
}

/// Validate that a tar entry path does not escape the destination
/// directory via `..` components or absolute paths.
fn validate_entry_path(path: &Path) -> Result<(), ExtractionError> {
    let escapes = path.is_absolute()
        || path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));
    if escapes {
        return Err(ExtractionError::PathTraversal {
            path: path.display().to_string(),
        });
    }
    Ok(())
}

/// Find the extracted file whose name is `binary`.
///
/// A top-level entry wins over a nested one, so `ralf` beats
/// `ralf-linux-amd64/ralf`.
#[must_use]
pub fn locate_binary<'a>(extracted: &'a [PathBuf], binary: &str) -> Option<&'a Path> {
    extracted
        .iter()
        .filter(|path| path.file_name().is_some_and(|name| name == binary))
        .min_by_key(|path| path.components().count())
        .map(PathBuf::as_path)
}
