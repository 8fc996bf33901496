//! Tests for status, purge, doctor, and clips subcommands.

use super::parse;
use crate::cli::CliCommand;
use clap::Parser;

#[test]
fn cli_parse_status() {
    assert!(matches!(parse(&["vox", "status"]), CliCommand::Status));
}

#[test]
fn cli_parse_purge_default() {
    match parse(&["vox", "purge"]) {
        CliCommand::Purge { all, stale } => {
            assert!(!all);
            assert!(!stale);
        }
        _ => panic!("expected Purge"),
    }
}

#[test]
fn cli_parse_purge_all_and_stale_conflict() {
    assert!(matches!(
        parse(&["vox", "purge", "--all"]),
        CliCommand::Purge { all: true, .. }
    ));
    assert!(matches!(
        parse(&["vox", "purge", "--stale"]),
        CliCommand::Purge { stale: true, .. }
    ));
    assert!(crate::cli::Cli::try_parse_from(["vox", "purge", "--all", "--stale"]).is_err());
}

#[test]
fn cli_parse_doctor() {
    match parse(&["vox", "doctor"]) {
        CliCommand::Doctor { id } => assert!(id.is_none()),
        _ => panic!("expected Doctor"),
    }
    match parse(&["vox", "doctor", "main"]) {
        CliCommand::Doctor { id } => assert_eq!(id.as_deref(), Some("main")),
        _ => panic!("expected Doctor with id"),
    }
}

#[test]
fn cli_parse_clips() {
    match parse(&["vox", "clips", "--character", "haruka"]) {
        CliCommand::Clips { character } => assert_eq!(character.as_deref(), Some("haruka")),
        _ => panic!("expected Clips"),
    }
}
