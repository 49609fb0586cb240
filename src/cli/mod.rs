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

//! Command-line interface for pssh.

use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

#[cfg(test)]
mod command_tests;

pub const USAGE_HINT: &str = "Usage: pssh [--config <FILE>] [--no-color] [-v] '<command>'\n       pssh [--config <FILE>] [--no-color] [-v] -- <command> [args...]\n\nFor more information, try 'pssh --help'";

#[derive(Parser, Debug)]
#[command(
    name = "pssh",
    version,
    about = "Run one shell command on many hosts over ssh in parallel",
    long_about = "pssh runs a shell command on every host listed in its config file at the same time,\nthrough the local ssh client. Each output line is prefixed with the host address,\npadded to a common width and colored per host.",
    after_help = "CONFIGURATION:\n  Hosts are read from a JSON array, looked up in this order:\n    1. --config <FILE>\n    2. $PSSH_CONFIG\n    3. ~/.config/pssh/config.json\n  Each entry: {\"address\": \"10.0.0.1\", \"username\": \"ops\", \"port\": 22,\n               \"key_file\": \"~/.ssh/id_ed25519\", \"color\": \"\\u001b[0;34m\"}\n\nENVIRONMENT:\n  PSSH_CONFIG  Config file path\n  PSSH_SSH     ssh client program to use instead of 'ssh'\n  NO_COLOR     Disable colored labels when set to a non-empty value\n\nEXAMPLES:\n  pssh uptime\n  pssh 'df -h | grep /data'\n  pssh -- systemctl status nginx"
)]
pub struct Cli {
    #[arg(
        long,
        value_name = "FILE",
        help = "Config file path (overrides PSSH_CONFIG and ~/.config/pssh/config.json)"
    )]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Disable colored host labels (same as NO_COLOR=1)")]
    pub no_color: bool,

    #[arg(
        short = 'v',
        long,
        action = clap::ArgAction::Count,
        help = "Increase log verbosity on stderr (-v, -vv, -vvv)"
    )]
    pub verbose: u8,

    // Every word before `--`; more than one is rejected in `remote_command`.
    #[arg(
        value_name = "COMMAND",
        num_args = 0..,
        help = "Command to run, as a single (quoted) argument"
    )]
    pub command: Vec<String>,

    #[arg(
        last = true,
        value_name = "ARGS",
        help = "Command words after '--', joined with spaces"
    )]
    pub command_args: Vec<String>,
}

/// Problems with the command part of the arguments.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("No command provided.")]
    Missing,

    #[error(
        "Please provide the command to execute as a single argument, or use '--' for multiple arguments."
    )]
    Ambiguous,
}

impl Cli {
    /// The command string sent to every host.
    ///
    /// A single argument is used verbatim; words after `--` are joined with
    /// single spaces. Several words without `--`, or both forms at once, are
    /// ambiguous. Nothing at all is missing.
    pub fn remote_command(&self) -> Result<String, CommandError> {
        let command = match (self.command.as_slice(), self.command_args.as_slice()) {
            ([], []) => return Err(CommandError::Missing),
            ([command], []) => command.clone(),
            ([], args) => args.join(" "),
            _ => return Err(CommandError::Ambiguous),
        };

        if command.trim().is_empty() {
            Err(CommandError::Missing)
        } else {
            Ok(command)
        }
    }
}
