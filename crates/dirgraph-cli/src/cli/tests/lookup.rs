//! Tests for user, users, groups, is-in-group, thumbnail.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::Path;

#[test]
fn cli_parse_user() {
    match parse(&["dirgraph", "user", "richard@contoso.com"]) {
        CliCommand::User { upn } => assert_eq!(upn, "richard@contoso.com"),
        _ => panic!("expected User"),
    }
}

#[test]
fn cli_parse_users() {
    match parse(&["dirgraph", "users"]) {
        CliCommand::Users => {}
        _ => panic!("expected Users"),
    }
}

#[test]
fn cli_parse_groups() {
    match parse(&["dirgraph", "groups", "andy@contoso.com"]) {
        CliCommand::Groups { upn } => assert_eq!(upn, "andy@contoso.com"),
        _ => panic!("expected Groups"),
    }
}

#[test]
fn cli_parse_is_in_group() {
    match parse(&["dirgraph", "is-in-group", "andy@contoso.com", "superuser"]) {
        CliCommand::IsInGroup { upn, group } => {
            assert_eq!(upn, "andy@contoso.com");
            assert_eq!(group, "superuser");
        }
        _ => panic!("expected IsInGroup"),
    }
}

#[test]
fn cli_parse_thumbnail() {
    match parse(&[
        "dirgraph",
        "thumbnail",
        "andy@contoso.com",
        "--out",
        "andy.jpg",
    ]) {
        CliCommand::Thumbnail { upn, out } => {
            assert_eq!(upn, "andy@contoso.com");
            assert_eq!(out, Path::new("andy.jpg"));
        }
        _ => panic!("expected Thumbnail"),
    }
}

#[test]
fn cli_thumbnail_requires_out() {
    assert!(Cli::try_parse_from(["dirgraph", "thumbnail", "andy@contoso.com"]).is_err());
}
