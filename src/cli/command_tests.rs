// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Tests for assembling the remote command from arguments.

use super::{Cli, CommandError};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_single_argument_is_used_verbatim() {
    let cli = Cli::parse_from(["pssh", "df -h | grep  /data"]);
    assert_eq!(cli.remote_command().unwrap(), "df -h | grep  /data");
}

#[test]
fn test_words_after_separator_are_joined() {
    let cli = Cli::parse_from(["pssh", "--", "systemctl", "status", "nginx"]);
    assert!(cli.command.is_empty());
    assert_eq!(cli.remote_command().unwrap(), "systemctl status nginx");
}

#[test]
fn test_words_after_separator_may_look_like_flags() {
    let cli = Cli::parse_from(["pssh", "--", "ls", "-la", "--color=never"]);
    assert_eq!(cli.remote_command().unwrap(), "ls -la --color=never");
}

#[test]
fn test_single_word_after_separator() {
    let cli = Cli::parse_from(["pssh", "--", "uptime"]);
    assert_eq!(cli.remote_command().unwrap(), "uptime");
}

#[test]
fn test_missing_command() {
    let cli = Cli::parse_from(["pssh"]);
    assert_eq!(cli.remote_command(), Err(CommandError::Missing));

    let cli = Cli::parse_from(["pssh", "--"]);
    assert_eq!(cli.remote_command(), Err(CommandError::Missing));

    let cli = Cli::parse_from(["pssh", "  "]);
    assert_eq!(cli.remote_command(), Err(CommandError::Missing));
}

#[test]
fn test_command_and_separator_together_is_ambiguous() {
    let cli = Cli::parse_from(["pssh", "uptime", "--", "hostname"]);
    assert_eq!(cli.remote_command(), Err(CommandError::Ambiguous));
}

#[test]
fn test_multiple_words_without_separator_are_ambiguous() {
    let cli = Cli::parse_from(["pssh", "echo", "hi"]);
    assert_eq!(cli.command, vec!["echo".to_string(), "hi".to_string()]);
    assert_eq!(cli.remote_command(), Err(CommandError::Ambiguous));

    let cli = Cli::parse_from(["pssh", "--config", "c.json", "echo", "hi"]);
    assert_eq!(cli.remote_command(), Err(CommandError::Ambiguous));
}

#[test]
fn test_unknown_flag_is_a_parse_error() {
    let err = Cli::try_parse_from(["pssh", "--bogus", "x"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
}

#[test]
fn test_options() {
    let cli = Cli::parse_from([
        "pssh",
        "--config",
        "/tmp/hosts.json",
        "--no-color",
        "-vv",
        "uptime",
    ]);
    assert_eq!(cli.config, Some(PathBuf::from("/tmp/hosts.json")));
    assert!(cli.no_color);
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.remote_command().unwrap(), "uptime");
}

#[test]
fn test_defaults() {
    let cli = Cli::parse_from(["pssh", "uptime"]);
    assert_eq!(cli.config, None);
    assert!(!cli.no_color);
    assert_eq!(cli.verbose, 0);
}
