//! SHA-256 digest newtype for artefact verification.
//!
//! Stores a 64-character lowercase hexadecimal string. Values supplied on the
//! command line are trimmed and lowercased before validation, so `--sha256`
//! accepts the output of either `sha256sum` or `shasum -a 256` verbatim.

use super::error::{ArtefactError, Result};
use sha2::{Digest, Sha256};
use std::fmt;
use std::io::Read;
use std::path::Path;

/// Expected length of a hex-encoded SHA-256 digest.
const DIGEST_HEX_LEN: usize = 64;

/// Read buffer size used when hashing files.
const HASH_BUFFER_LEN: usize = 8192;

/// A validated hex-encoded SHA-256 digest string.
///
/// # Examples
///
/// ```
/// use ralf_installer::artefact::sha256_digest::Sha256Digest;
///
/// let hex = "a".repeat(64);
/// let digest: Sha256Digest = hex.as_str().try_into().expect("valid digest");
/// assert_eq!(digest.as_str().len(), 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sha256Digest(String);

impl Sha256Digest {
    /// Parse a digest typed by a user.
    ///
    /// Surrounding whitespace is ignored and upper-case hex is folded to
    /// lower case.
    ///
    /// # Errors
    ///
    /// Returns [`ArtefactError::InvalidSha256Digest`] when the trimmed value
    /// is not exactly 64 hexadecimal characters.
    ///
    /// # Examples
    ///
    /// ```
    /// use ralf_installer::artefact::sha256_digest::Sha256Digest;
    ///
    /// let digest = Sha256Digest::parse_user_input(&format!("  {}\n", "AB".repeat(32)))
    ///     .expect("valid digest");
    /// assert_eq!(digest.as_str(), "ab".repeat(32));
    /// ```
    pub fn parse_user_input(value: &str) -> Result<Self> {
        Self::try_from(value.trim().to_ascii_lowercase())
    }

    /// Compute the digest of `bytes`.
    #[must_use]
    pub fn of_bytes(bytes: &[u8]) -> Self {
        Self(format!("{:x}", Sha256::digest(bytes)))
    }

    /// Compute the digest of the file at `path`, streaming its contents.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised while opening or reading the file.
    pub fn of_file(path: &Path) -> std::io::Result<Self> {
        let mut file = std::fs::File::open(path)?;
        let mut hasher = Sha256::new();
        let mut buffer = [0u8; HASH_BUFFER_LEN];
        loop {
            let bytes_read = file.read(&mut buffer)?;
            let Some(chunk) = buffer.get(..bytes_read) else {
                break;
            };
            if chunk.is_empty() {
                break;
            }
            hasher.update(chunk);
        }
        Ok(Self(format!("{:x}", hasher.finalize())))
    }

    /// Return the digest as a hex string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<&str> for Sha256Digest {
    type Error = ArtefactError;

    fn try_from(value: &str) -> Result<Self> {
        validate_sha256(value)?;
        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for Sha256Digest {
    type Error = ArtefactError;

    fn try_from(value: String) -> Result<Self> {
        validate_sha256(&value)?;
        Ok(Self(value))
    }
}

impl AsRef<str> for Sha256Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validate that `value` is a well-formed hex-encoded SHA-256 digest.
fn validate_sha256(value: &str) -> Result<()> {
    if value.len() != DIGEST_HEX_LEN {
        return Err(ArtefactError::InvalidSha256Digest {
            reason: format!(
                "expected {DIGEST_HEX_LEN} hex characters, got {}",
                value.len()
            ),
        });
    }
    if let Some(bad) = value.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ArtefactError::InvalidSha256Digest {
            reason: format!("non-hex character '{bad}'"),
        });
    }
    if value.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(ArtefactError::InvalidSha256Digest {
            reason: "digest must be lowercase".to_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// SHA-256 of the empty input.
    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    fn valid_digest() -> String {
        "a".repeat(64)
    }

    #[test]
    fn accepts_valid_sixty_four_char_hex() {
        let digest = Sha256Digest::try_from(valid_digest().as_str());
        assert!(digest.is_ok());
    }

    #[rstest]
    #[case::too_short("abcdef".to_owned())]
    #[case::too_long("a".repeat(65))]
    #[case::non_hex(format!("{}g", "a".repeat(63)))]
    #[case::uppercase("A".repeat(64))]
    fn rejects_malformed_digests(#[case] value: String) {
        assert!(Sha256Digest::try_from(value).is_err());
    }

    #[test]
    fn user_input_is_trimmed_and_lowercased() {
        let digest = Sha256Digest::parse_user_input(&format!(" {} ", "F".repeat(64)))
            .expect("valid digest");
        assert_eq!(digest.as_str(), "f".repeat(64));
    }

    #[test]
    fn user_input_still_rejects_truncated_values() {
        let err = Sha256Digest::parse_user_input("deadbeef").expect_err("too short");
        assert!(err.to_string().contains("expected 64 hex characters, got 8"));
    }

    #[test]
    fn of_bytes_matches_known_vector() {
        assert_eq!(Sha256Digest::of_bytes(b"").as_str(), EMPTY_SHA256);
    }

    #[test]
    fn of_file_matches_of_bytes() {
        let temp = tempfile::tempdir().expect("temp dir");
        let path = temp.path().join("payload");
        let payload = vec![7u8; HASH_BUFFER_LEN * 2 + 13];
        std::fs::write(&path, &payload).expect("write payload");

        let from_file = Sha256Digest::of_file(&path).expect("hash file");
        assert_eq!(from_file, Sha256Digest::of_bytes(&payload));
    }

    #[test]
    fn display_shows_full_digest() {
        let hex = valid_digest();
        let digest = Sha256Digest::try_from(hex.as_str()).expect("known good");
        assert_eq!(format!("{digest}"), hex);
    }
}
