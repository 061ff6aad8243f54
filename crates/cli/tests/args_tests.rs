//! Argument parsing and configuration resolution tests.

use clap::Parser;
use logscan_cli::args::*;
use logscan_cli::commands::harvest::resolve_config;
use logscan_config::LogKind;
use std::io::Write;
use std::path::PathBuf;

fn harvest(args: &[&str]) -> (Cli, HarvestArgs) {
    let mut argv = vec!["logscan", "harvest"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();
    let Command::Harvest(harvest) = cli.command.clone() else {
        panic!("expected harvest subcommand");
    };
    (cli, harvest)
}

#[test]
fn test_harvest_defaults() {
    let (cli, args) = harvest(&["--account", "ACC1"]);
    assert_eq!(cli.config, None);
    assert!(!cli.verbose);
    assert_eq!(cli.log_format, LogFormat::Text);
    assert_eq!(args.account, "ACC1");
    assert_eq!(args.start_time, None);
    assert_eq!(args.end_time, None);
    assert_eq!(args.filter, None);
    assert_eq!(args.output, None);
    assert_eq!(args.limit, None);
    assert_eq!(args.kind, None);
    assert!(!args.clip_to_window);
}

#[test]
fn test_account_is_required() {
    assert!(Cli::try_parse_from(["logscan", "harvest"]).is_err());
    assert!(Cli::try_parse_from(["logscan"]).is_err());
}

#[test]
fn test_harvest_with_options() {
    let (cli, args) = harvest(&[
        "--account",
        "ACC1",
        "--url",
        "http://localhost:8899",
        "--start-time",
        "1000",
        "--end-time",
        "2000",
        "--filter",
        "foo",
        "--output",
        "out.txt",
        "--limit",
        "50",
        "--kind",
        "data",
        "--max-concurrency",
        "8",
        "--clip-to-window",
        "--verbose",
        "--log-format",
        "json",
    ]);
    assert!(cli.verbose);
    assert_eq!(cli.log_format, LogFormat::Json);
    assert_eq!(args.url.as_deref(), Some("http://localhost:8899"));
    assert_eq!(args.output, Some(PathBuf::from("out.txt")));
    assert_eq!(args.kind, Some(KindArg::Data));
    assert_eq!(args.needle(), "foo");

    let window = args.window(0).unwrap();
    assert_eq!((window.start, window.end), (1000, 2000));
}

#[test]
fn test_inverted_window_is_rejected() {
    let (_, args) = harvest(&["-a", "ACC1", "-s", "2000", "-e", "1000"]);
    assert!(args.window(5000).is_err());
}

#[test]
fn test_flags_override_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[rpc]\nurl = \"http://file:8899\"\n\n[harvest]\npage_limit = 200\nlog_kind = \"log\""
    )
    .unwrap();

    let (_, args) = harvest(&["-a", "ACC1"]);
    let config = resolve_config(&args, Some(file.path())).unwrap();
    assert_eq!(config.rpc.url, "http://file:8899");
    assert_eq!(config.harvest.page_limit, 200);
    assert_eq!(config.harvest.log_kind, LogKind::Log);

    let (_, args) = harvest(&["-a", "ACC1", "--limit", "10", "--kind", "any", "-u", "http://flag"]);
    let config = resolve_config(&args, Some(file.path())).unwrap();
    assert_eq!(config.rpc.url, "http://flag");
    assert_eq!(config.harvest.page_limit, 10);
    assert_eq!(config.harvest.log_kind, LogKind::Any);
}

#[test]
fn test_invalid_limit_is_a_configuration_error() {
    let (_, args) = harvest(&["-a", "ACC1", "--limit", "0"]);
    let err = resolve_config(&args, None).unwrap_err();
    assert!(format!("{err:#}").contains("page_limit"));
}

#[test]
fn test_missing_config_file_is_an_error() {
    let (_, args) = harvest(&["-a", "ACC1"]);
    assert!(resolve_config(&args, Some(PathBuf::from("/nonexistent/logscan.toml").as_path())).is_err());
}

#[test]
fn test_decode_defaults() {
    let cli = Cli::try_parse_from(["logscan", "decode", "--idl", "idl.json", "--event-name", "Tick"])
        .unwrap();
    let Command::Decode(args) = cli.command else {
        panic!("expected decode subcommand");
    };
    assert_eq!(args.idl, PathBuf::from("idl.json"));
    assert_eq!(args.event_name, "Tick");
    assert_eq!(args.input, PathBuf::from("output.txt"));
    assert_eq!(args.output, PathBuf::from("events.txt"));
    assert_eq!(args.value_field, "value");
    assert_eq!(args.timestamp_field, "timestamp");
}

#[test]
fn test_decode_requires_event_name() {
    assert!(Cli::try_parse_from(["logscan", "decode", "--idl", "idl.json"]).is_err());
}
