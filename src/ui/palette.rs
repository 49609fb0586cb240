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

//! Color palette and per-host color assignment.
//!
//! Colors are plain escape sequences rather than styled values because a host
//! may carry an arbitrary sequence in its config, and both kinds have to be
//! printed the same way.

use std::ffi::OsStr;

use crate::host::HostTarget;

/// Color is turned off when this is set to a non-empty value.
pub const NO_COLOR_ENV: &str = "NO_COLOR";

/// Sequence that ends a colored label.
pub const RESET: &str = "\x1b[0m";

const DEFAULT_COLORS: [&str; 13] = [
    "\x1b[0;31m",
    "\x1b[0;32m",
    "\x1b[0;33m",
    "\x1b[0;34m",
    "\x1b[0;35m",
    "\x1b[0;36m",
    "\x1b[0;37m",
    "\x1b[1;31m",
    "\x1b[1;32m",
    "\x1b[1;33m",
    "\x1b[1;34m",
    "\x1b[1;35m",
    "\x1b[1;36m",
];

/// Ordered color codes cycled across hosts without an explicit color.
///
/// Never empty: constructing one from an empty list yields a single `""`
/// entry, so indexing always succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    codes: Vec<String>,
}

impl Palette {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let codes: Vec<String> = codes.into_iter().map(Into::into).collect();
        if codes.is_empty() {
            return Self::disabled();
        }
        Self { codes }
    }

    /// Single no-op entry, used when color output is turned off.
    pub fn disabled() -> Self {
        Self {
            codes: vec![String::new()],
        }
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn get(&self, index: usize) -> &str {
        &self.codes[index % self.codes.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(DEFAULT_COLORS)
    }
}

/// Interpret the value of `NO_COLOR`. Set-but-empty counts as unset.
pub fn color_disabled_by_env(value: Option<&OsStr>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// Color for one host.
///
/// An explicit `host.color` wins over the palette; disabling color beats
/// both. `sequential_index` is the number of colorless hosts seen before this
/// one.
pub fn assign_color(
    host: &HostTarget,
    sequential_index: usize,
    palette: &Palette,
    color_disabled: bool,
) -> String {
    if color_disabled {
        return String::new();
    }
    match host.color() {
        Some(explicit) => explicit.to_string(),
        None => palette.get(sequential_index).to_string(),
    }
}

/// Colors for every host, in input order.
///
/// Runs before any job is spawned so each job gets an already resolved,
/// immutable color. Hosts with an explicit color do not consume a palette slot.
pub fn assign_colors(
    hosts: &[HostTarget],
    palette: &Palette,
    color_disabled: bool,
) -> Vec<String> {
    let mut sequential_index = 0;
    hosts
        .iter()
        .map(|host| {
            let color = assign_color(host, sequential_index, palette, color_disabled);
            if host.color().is_none() {
                sequential_index += 1;
            }
            color
        })
        .collect()
}
