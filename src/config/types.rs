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

//! Configuration type definitions.

use serde::{Deserialize, Serialize};

use crate::host::HostTarget;

/// The parsed config file: an ordered JSON array of hosts.
///
/// ```json
/// [
///   { "address": "10.0.0.1" },
///   { "address": "db1.internal", "username": "ops", "port": 2200,
///     "key_file": "~/.ssh/id_ops", "color": "\u001b[0;34m" }
/// ]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config {
    pub hosts: Vec<HostTarget>,
}

impl Config {
    pub fn new(hosts: Vec<HostTarget>) -> Self {
        Self { hosts }
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    /// Whether any host relies on the local login name.
    pub fn needs_local_user(&self) -> bool {
        self.hosts.iter().any(|h| h.username().is_none())
    }

    pub fn into_hosts(self) -> Vec<HostTarget> {
        self.hosts
    }
}
