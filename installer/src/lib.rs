//! ralf installer library.
//!
//! This crate installs and removes the `ralf` command-line binary from its
//! GitHub releases. It is used by the `ralf-installer` CLI binary and can be
//! consumed programmatically for testing or custom installation workflows.
//!
//! # Modules
//!
//! - [`artefact`] - Release artefact naming, download, verification, and extraction
//! - [`cli`] - Command-line argument definitions
//! - [`command`] - External command execution abstraction
//! - [`dirs`] - Directory resolution abstraction for the default prefix
//! - [`error`] - Semantic error types
//! - [`install`] - The install workflow
//! - [`output`] - Progress, warning, and dry-run formatting
//! - [`platform`] - Host platform detection
//! - [`release`] - Release version resolution
//! - [`scratch`] - Scoped scratch directories and interrupt cleanup
//! - [`uninstall`] - Removal of an installed binary

pub mod artefact;
pub mod cli;
pub mod command;
pub mod dirs;
pub mod error;
pub mod install;
pub mod output;
pub mod platform;
pub mod release;
pub mod scratch;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
pub mod uninstall;
