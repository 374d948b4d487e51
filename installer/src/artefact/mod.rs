//! Release artefact naming, retrieval, verification, and extraction.
//!
//! # Sub-modules
//!
//! - [`download`] - Release metadata and asset download (`ReleaseSource`).
//! - [`error`] - Semantic error types for validation failures.
//! - [`extraction`] - Archive extraction with path traversal protection.
//! - [`naming`] - Artefact archive naming policy (`ArtefactName`).
//! - [`sha256_digest`] - SHA-256 digest newtype (`Sha256Digest`).
//! - [`verification`] - Verification policy and digest providers.

pub mod download;
pub mod error;
pub mod extraction;
pub mod naming;
pub mod sha256_digest;
pub mod verification;
