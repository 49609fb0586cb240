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

use crate::executor::{Outcome, RunResult};
use crate::host::HostTarget;

use super::palette::RESET;

/// Width every label is padded to: the longest address, in characters.
pub fn label_width(hosts: &[HostTarget]) -> usize {
    hosts
        .iter()
        .map(|h| h.address.chars().count())
        .max()
        .unwrap_or(0)
}

pub struct OutputFormatter;

impl OutputFormatter {
    /// Left-aligned label padded to `width`.
    pub fn label(address: &str, width: usize) -> String {
        format!("{address:<width$}")
    }

    /// Turn one host's result into the lines written to the console.
    ///
    /// Failures produce an "Error executing command" line, plus an
    /// "Error details" line when stderr had content. Error lines are never
    /// colored. Successful stdout lines keep their order.
    pub fn format_result(
        address: &str,
        width: usize,
        color: &str,
        result: &RunResult,
    ) -> Vec<String> {
        let label = Self::label(address, width);

        match &result.outcome {
            Outcome::Failure(reason) => {
                let mut lines = vec![format!("{label} Error executing command: {reason}")];
                // Stderr of nothing but line terminators gets no details line.
                let details = result.stderr.trim_end_matches(['\r', '\n']);
                if !details.is_empty() {
                    lines.push(format!("{label} Error details: {details}"));
                }
                lines
            }
            Outcome::Success => result
                .stdout
                .iter()
                .map(|line| Self::format_line(&label, color, line))
                .collect(),
        }
    }

    pub fn format_line(label: &str, color: &str, line: &str) -> String {
        if color.is_empty() {
            format!("{label} {line}")
        } else {
            format!("{color}{label}{RESET} {line}")
        }
    }
}
