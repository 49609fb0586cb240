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

//! Running one command on one host through the ssh client binary.

use anyhow::{Context, Result};
use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;

use crate::config::expand_tilde;
use crate::host::HostTarget;

use super::result_types::{InvokeError, RunResult};

/// Environment variable that replaces the `ssh` program.
pub const TRANSPORT_ENV: &str = "PSSH_SSH";

const DEFAULT_PROGRAM: &str = "ssh";

/// The remote-access client program, plus any options placed before the
/// destination argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transport {
    program: OsString,
    args: Vec<OsString>,
}

impl Transport {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Leading arguments, e.g. `["-o", "BatchMode=yes"]`.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// `PSSH_SSH` if set and non-empty, otherwise `ssh` from `PATH`.
    pub fn from_env() -> Self {
        match std::env::var_os(TRANSPORT_ENV) {
            Some(program) if !program.is_empty() => Self::new(program),
            _ => Self::default(),
        }
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

/// Builds and runs the transport process for a single host.
#[derive(Debug, Clone)]
pub struct RemoteInvoker {
    transport: Transport,
    local_user: String,
}

impl RemoteInvoker {
    /// `local_user` is used for hosts without a configured username. It is
    /// resolved once per run, see [`resolve_local_username`].
    pub fn new(transport: Transport, local_user: impl Into<String>) -> Self {
        Self {
            transport,
            local_user: local_user.into(),
        }
    }

    /// Arguments passed to the transport:
    /// `user@address [-p port] [-i key_file] command`.
    ///
    /// The command is forwarded as one argument, exactly as given.
    pub fn build_args(&self, host: &HostTarget, command: &str) -> Vec<OsString> {
        let mut args = vec![OsString::from(host.destination(&self.local_user))];

        if let Some(port) = host.port() {
            args.push("-p".into());
            args.push(port.to_string().into());
        }

        if let Some(key_file) = host.key_file() {
            args.push("-i".into());
            args.push(expand_tilde(Path::new(key_file)).into_os_string());
        }

        args.push(command.into());
        args
    }

    /// Run `command` on `host` and buffer everything it prints.
    ///
    /// Never returns an error: spawn failures, I/O failures and non-zero
    /// exits all come back as [`Outcome::Failure`](super::Outcome::Failure).
    /// There is no timeout; a remote command that never exits keeps this
    /// future pending.
    pub async fn invoke(&self, host: &HostTarget, command: &str) -> RunResult {
        let args = self.build_args(host, command);
        tracing::debug!(
            host = %host.address,
            program = ?self.transport.program,
            ?args,
            "Spawning transport"
        );

        let child = Command::new(&self.transport.program)
            .args(&self.transport.args)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();

        let child = match child {
            Ok(child) => child,
            Err(source) => {
                tracing::debug!(host = %host.address, "Failed to spawn transport: {}", source);
                return RunResult::failure(
                    InvokeError::Spawn {
                        program: self.transport.program.to_string_lossy().into_owned(),
                        source,
                    },
                    String::new(),
                );
            }
        };

        let output = match child.wait_with_output().await {
            Ok(output) => output,
            Err(e) => return RunResult::failure(InvokeError::Wait(e), String::new()),
        };

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if let Some(error) = exit_error(output.status) {
            tracing::debug!(host = %host.address, "Command failed: {}", error);
            return RunResult::failure(error, stderr);
        }

        let stdout = String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::to_owned)
            .collect();

        RunResult::success(stdout, stderr)
    }
}

fn exit_error(status: ExitStatus) -> Option<InvokeError> {
    if status.success() {
        return None;
    }
    if let Some(code) = status.code() {
        return Some(InvokeError::ExitCode(code));
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return Some(InvokeError::Signal(signal));
        }
    }
    Some(InvokeError::NoStatus)
}

/// Login name of the invoking user.
///
/// Checked once before dispatch. Failing here aborts the whole run since no
/// host without an explicit username could be reached either.
pub fn resolve_local_username() -> Result<String> {
    if let Some(user) = username_from_env(|key| std::env::var_os(key)) {
        return Ok(user);
    }
    whoami::fallible::username().context("Failed to determine the current user name")
}

fn username_from_env(lookup: impl Fn(&str) -> Option<OsString>) -> Option<String> {
    ["USER", "USERNAME", "LOGNAME"]
        .into_iter()
        .filter_map(|key| lookup(key))
        .filter_map(|value| value.into_string().ok())
        .find(|value| !value.is_empty())
}
