//! ralf installer CLI entrypoint.
//!
//! This binary downloads the `ralf` release matching the host platform and
//! places it under a prefix, or removes a previously installed binary.

use clap::Parser;
use clap::error::ErrorKind;
use ralf_installer::cli::{Cli, Command, InstallArgs, UninstallArgs};
use ralf_installer::dirs::{SystemBaseDirs, resolve_prefix};
use ralf_installer::error::Result;
use ralf_installer::install::install;
use ralf_installer::output::write_stderr_line;
use ralf_installer::scratch::install_interrupt_hook;
use ralf_installer::uninstall::uninstall;
use std::io::Write;

/// Exit code for usage errors; clap's own default is 2.
const EXIT_USAGE: i32 = 1;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let exit_code = exit_code_for_parse_error(err.kind());
            if err.print().is_err() {
                // Nothing more useful to report.
            }
            std::process::exit(exit_code);
        }
    };

    if let Err(err) = install_interrupt_hook() {
        log::warn!("could not install interrupt handler: {err}");
    }

    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<()> {
    match &cli.command {
        Command::Install(args) => run_install(args, stderr),
        Command::Uninstall(args) => run_uninstall(args, stderr),
    }
}

fn run_install(args: &InstallArgs, stderr: &mut dyn Write) -> Result<()> {
    let request = args.to_request(&SystemBaseDirs)?;
    log::debug!("install request: {request:?}");
    install(&request, &args.release_source(), stderr)?;
    Ok(())
}

fn run_uninstall(args: &UninstallArgs, stderr: &mut dyn Write) -> Result<()> {
    let prefix = resolve_prefix(args.prefix.clone(), &SystemBaseDirs)?;
    uninstall(&prefix, args.quiet, stderr)?;
    Ok(())
}

/// Help and version requests succeed; every other parse failure is a usage
/// error.
fn exit_code_for_parse_error(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => EXIT_USAGE,
    }
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, format_args!("Error: {err}"));
            1
        }
    }
}
