//! Tests for classify and provider.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;

#[test]
fn cli_parse_classify_without_headers() {
    match parse(&["vidgrab", "classify", "https://cdn.example.com/master.m3u8"]) {
        CliCommand::Classify { url, headers } => {
            assert_eq!(url, "https://cdn.example.com/master.m3u8");
            assert!(headers.is_empty());
        }
        _ => panic!("expected Classify"),
    }
}

#[test]
fn cli_parse_classify_repeated_headers() {
    match parse(&[
        "vidgrab",
        "classify",
        "https://cdn.example.com/get?id=1",
        "-H",
        "Content-Type: video/mp4",
        "--header",
        "Content-Length: 1048576",
    ]) {
        CliCommand::Classify { headers, .. } => {
            assert_eq!(
                headers,
                vec!["Content-Type: video/mp4", "Content-Length: 1048576"]
            );
        }
        _ => panic!("expected Classify"),
    }
}

#[test]
fn cli_parse_classify_requires_url() {
    assert!(Cli::try_parse_from(["vidgrab", "classify"]).is_err());
}

#[test]
fn cli_parse_provider() {
    match parse(&["vidgrab", "provider", "https://dv97.sibnet.ru/v/a/1.mp4"]) {
        CliCommand::Provider { url } => assert_eq!(url, "https://dv97.sibnet.ru/v/a/1.mp4"),
        _ => panic!("expected Provider"),
    }
}
