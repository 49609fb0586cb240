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

//! Result types for a single remote invocation.

use std::io;
use thiserror::Error;

/// Why a single host's command did not succeed.
///
/// The `Display` text is what ends up after "Error executing command:".
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to collect output: {0}")]
    Wait(#[source] io::Error),

    #[error("exit status {0}")]
    ExitCode(i32),

    #[error("terminated by signal {0}")]
    Signal(i32),

    #[error("exited without a status code")]
    NoStatus,
}

#[derive(Debug)]
pub enum Outcome {
    Success,
    Failure(InvokeError),
}

/// Fully buffered output of one remote invocation.
#[derive(Debug)]
pub struct RunResult {
    /// Stdout split into lines, terminators removed.
    pub stdout: Vec<String>,
    /// Stderr exactly as captured.
    pub stderr: String,
    pub outcome: Outcome,
}

impl RunResult {
    pub fn success(stdout: Vec<String>, stderr: String) -> Self {
        Self {
            stdout,
            stderr,
            outcome: Outcome::Success,
        }
    }

    pub fn failure(error: InvokeError, stderr: String) -> Self {
        Self {
            stdout: Vec::new(),
            stderr,
            outcome: Outcome::Failure(error),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success)
    }

    pub fn error(&self) -> Option<&InvokeError> {
        match &self.outcome {
            Outcome::Failure(e) => Some(e),
            Outcome::Success => None,
        }
    }
}
