//! External command execution seam.
//!
//! Host introspection shells out to `uname`; routing that through a trait
//! lets tests stand in for any kernel and machine combination.

use crate::error::{InstallerError, Result};
use std::process::{Command, Output};

/// Abstraction for running external commands.
pub trait CommandExecutor {
    /// Runs a command with arguments and returns the captured output.
    ///
    /// # Errors
    ///
    /// Returns any I/O errors encountered while spawning or running the command.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use ralf_installer::command::{CommandExecutor, SystemCommandExecutor};
    ///
    /// let executor = SystemCommandExecutor;
    /// let output = executor.run("uname", &["-s"])?;
    /// assert!(output.status.success());
    /// # Ok::<(), ralf_installer::error::InstallerError>(())
    /// ```
    fn run(&self, cmd: &str, args: &[&str]) -> Result<Output>;
}

/// Executes commands on the host system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandExecutor;

impl CommandExecutor for SystemCommandExecutor {
    fn run(&self, cmd: &str, args: &[&str]) -> Result<Output> {
        log::trace!("running {cmd} {}", args.join(" "));
        Command::new(cmd)
            .args(args)
            .output()
            .map_err(InstallerError::from)
    }
}

/// Run a command and return its trimmed stdout, failing on a non-zero exit.
///
/// # Errors
///
/// Returns [`InstallerError::PlatformProbe`] when the command cannot be
/// spawned, exits unsuccessfully, or prints nothing.
pub fn capture_stdout(executor: &dyn CommandExecutor, cmd: &str, args: &[&str]) -> Result<String> {
    let invocation = format!("{cmd} {}", args.join(" "));
    let output = executor
        .run(cmd, args)
        .map_err(|e| InstallerError::PlatformProbe {
            reason: format!("{invocation}: {e}"),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(InstallerError::PlatformProbe {
            reason: format!("{invocation} exited with {}: {}", output.status, stderr.trim()),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_owned();
    if stdout.is_empty() {
        return Err(InstallerError::PlatformProbe {
            reason: format!("{invocation} produced no output"),
        });
    }
    Ok(stdout)
}
