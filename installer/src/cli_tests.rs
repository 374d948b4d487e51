//! Tests for installer CLI parsing and default behaviours.

use super::*;
use clap::error::ErrorKind;
use rstest::rstest;
use std::path::PathBuf;

const ENV_KEYS: [&str; 5] = [
    "VERSION",
    "PREFIX",
    "RALF_REPOSITORY",
    "RALF_GITHUB_API_URL",
    "RALF_GITHUB_DOWNLOAD_URL",
];

struct FixedHome(Option<PathBuf>);

impl BaseDirs for FixedHome {
    fn home_dir(&self) -> Option<PathBuf> {
        self.0.clone()
    }
}

/// Parse `args` with every installer environment variable unset.
fn parse_clean(args: &[&str]) -> std::result::Result<Cli, clap::Error> {
    let unset: Vec<(&str, Option<&str>)> = ENV_KEYS.iter().map(|key| (*key, None)).collect();
    temp_env::with_vars(unset, || Cli::try_parse_from(args))
}

fn install_args(cli: Cli) -> InstallArgs {
    match cli.command {
        Command::Install(args) => args,
        Command::Uninstall(_) => panic!("expected Install command"),
    }
}

#[test]
fn install_parses_defaults() {
    let args = install_args(parse_clean(&["ralf-installer", "install"]).expect("parses"));
    assert_eq!(args.version, "latest");
    assert!(args.prefix.is_none());
    assert!(args.sha256.is_none());
    assert!(!args.dry_run);
    assert!(!args.quiet);
    assert_eq!(args.release_source(), ReleaseSource::default());
}

#[test]
fn install_parses_every_flag() {
    let digest = "A".repeat(64);
    let args = install_args(
        parse_clean(&[
            "ralf-installer",
            "install",
            "--version",
            "v0.1.0",
            "--prefix",
            "/tmp/x",
            "--sha256",
            &digest,
            "--dry-run",
            "-q",
        ])
        .expect("parses"),
    );
    assert_eq!(args.version, "v0.1.0");
    assert_eq!(args.prefix, Some(Utf8PathBuf::from("/tmp/x")));
    assert_eq!(
        args.sha256.as_ref().map(Sha256Digest::as_str),
        Some("a".repeat(64).as_str())
    );
    assert!(args.dry_run);
    assert!(args.quiet);
}

#[test]
fn uninstall_parses_prefix_and_quiet() {
    let cli = parse_clean(&["ralf-installer", "uninstall", "--prefix", "/opt", "--quiet"])
        .expect("parses");
    match cli.command {
        Command::Uninstall(args) => {
            assert_eq!(args.prefix, Some(Utf8PathBuf::from("/opt")));
            assert!(args.quiet);
        }
        Command::Install(_) => panic!("expected Uninstall command"),
    }
}

#[rstest]
#[case::unknown_flag(&["ralf-installer", "install", "--frobnicate"])]
#[case::missing_value(&["ralf-installer", "install", "--prefix"])]
#[case::short_digest(&["ralf-installer", "install", "--sha256", "abc123"])]
#[case::non_hex_digest(&["ralf-installer", "install", "--sha256", "gggggggggggggggggggggggggggggggggggggggggggggggggggggggggggggggg"])]
#[case::uninstall_rejects_version(&["ralf-installer", "uninstall", "--version", "v1"])]
#[case::missing_subcommand(&["ralf-installer"])]
fn invalid_arguments_are_usage_errors(#[case] args: &[&str]) {
    let err = parse_clean(args).expect_err("usage error");
    assert!(!matches!(
        err.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    ));
}

#[test]
fn unknown_flag_error_names_the_flag() {
    let err = parse_clean(&["ralf-installer", "install", "--frobnicate"]).expect_err("unknown");
    assert!(err.to_string().contains("--frobnicate"));
}

#[rstest]
#[case::install_help(&["ralf-installer", "install", "--help"])]
#[case::install_short_help(&["ralf-installer", "install", "-h"])]
#[case::uninstall_help(&["ralf-installer", "uninstall", "-h"])]
fn help_is_reported_as_display_help(#[case] args: &[&str]) {
    let err = parse_clean(args).expect_err("help short-circuits");
    assert_eq!(err.kind(), ErrorKind::DisplayHelp);
}

#[test]
fn root_version_flag_reports_installer_version() {
    let err = parse_clean(&["ralf-installer", "--version"]).expect_err("version short-circuits");
    assert_eq!(err.kind(), ErrorKind::DisplayVersion);
}

#[test]
fn environment_supplies_version_and_prefix() {
    let cli = temp_env::with_vars(
        [("VERSION", Some("v0.2.0")), ("PREFIX", Some("/srv/ralf"))],
        || Cli::try_parse_from(["ralf-installer", "install"]),
    )
    .expect("parses");
    let args = install_args(cli);
    assert_eq!(args.version, "v0.2.0");
    assert_eq!(args.prefix, Some(Utf8PathBuf::from("/srv/ralf")));
}

#[test]
fn flags_override_environment() {
    let cli = temp_env::with_vars(
        [("VERSION", Some("v0.2.0")), ("PREFIX", Some("/srv/ralf"))],
        || {
            Cli::try_parse_from([
                "ralf-installer",
                "install",
                "--version",
                "v0.3.0",
                "--prefix",
                "/opt/ralf",
            ])
        },
    )
    .expect("parses");
    let args = install_args(cli);
    assert_eq!(args.version, "v0.3.0");
    assert_eq!(args.prefix, Some(Utf8PathBuf::from("/opt/ralf")));
}

#[test]
fn hidden_overrides_build_release_source() {
    let args = install_args(
        parse_clean(&[
            "ralf-installer",
            "install",
            "--repository",
            "fork/ralf",
            "--github-api-url",
            "http://127.0.0.1:1",
            "--github-download-url",
            "http://127.0.0.1:2",
        ])
        .expect("parses"),
    );
    let source = args.release_source();
    assert_eq!(source.repository(), "fork/ralf");
    assert_eq!(
        source.latest_release_url(),
        "http://127.0.0.1:1/repos/fork/ralf/releases/latest"
    );
}

#[test]
fn to_request_defaults_prefix_to_home_local() {
    let args = install_args(parse_clean(&["ralf-installer", "install"]).expect("parses"));
    let request = args
        .to_request(&FixedHome(Some(PathBuf::from("/home/ada"))))
        .expect("home known");
    assert_eq!(request.prefix, "/home/ada/.local");
    assert_eq!(request.version, ReleaseVersion::Latest);
    assert!(request.expected_checksum.is_none());
}

#[test]
fn to_request_without_home_or_prefix_fails() {
    let args = install_args(parse_clean(&["ralf-installer", "install"]).expect("parses"));
    let err = args.to_request(&FixedHome(None)).expect_err("no home");
    assert!(matches!(
        err,
        crate::error::InstallerError::HomeDirUnavailable { .. }
    ));
}

#[test]
fn sha256_help_states_the_exact_length() {
    use clap::CommandFactory;

    let command = Cli::command();
    let install = command
        .find_subcommand("install")
        .expect("install subcommand");
    let help = install
        .get_arguments()
        .find(|arg| arg.get_id() == "sha256")
        .and_then(clap::Arg::get_help)
        .expect("sha256 help")
        .to_string();
    assert!(help.contains("exactly 64 hex"), "help was: {help}");
    assert!(help.contains("rejected before downloading"), "help was: {help}");
}
