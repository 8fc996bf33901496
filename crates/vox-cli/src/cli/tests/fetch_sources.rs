//! Tests for the fetch, sources, and use subcommands.

use super::parse;
use crate::cli::CliCommand;

#[test]
fn cli_parse_fetch() {
    match parse(&["vox", "fetch", "haruka/01.mp3"]) {
        CliCommand::Fetch {
            path,
            cdn,
            output,
            refresh,
        } => {
            assert_eq!(path, "haruka/01.mp3");
            assert!(cdn.is_none());
            assert!(output.is_none());
            assert!(!refresh);
        }
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_fetch_with_flags() {
    match parse(&[
        "vox",
        "fetch",
        "nene/02.mp3",
        "--cdn",
        "mirror",
        "--output",
        "/tmp/out.mp3",
        "--refresh",
    ]) {
        CliCommand::Fetch {
            path,
            cdn,
            output,
            refresh,
        } => {
            assert_eq!(path, "nene/02.mp3");
            assert_eq!(cdn.as_deref(), Some("mirror"));
            assert_eq!(
                output.as_deref(),
                Some(std::path::Path::new("/tmp/out.mp3"))
            );
            assert!(refresh);
        }
        _ => panic!("expected Fetch with flags"),
    }
}

#[test]
fn cli_parse_sources() {
    assert!(matches!(parse(&["vox", "sources"]), CliCommand::Sources));
}

#[test]
fn cli_parse_use() {
    match parse(&["vox", "use", "main"]) {
        CliCommand::Use { id } => assert_eq!(id, "main"),
        _ => panic!("expected Use"),
    }
}

#[test]
fn cli_parse_forget() {
    assert!(matches!(parse(&["vox", "forget"]), CliCommand::Forget));
}
