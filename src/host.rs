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

use serde::{Deserialize, Serialize};
use std::fmt;

/// One remote endpoint a command is run against.
///
/// Optional string fields treat `""` the same as a missing key, and a port of
/// `0` means "use the transport default". Use the accessors rather than the
/// raw fields to get that normalization.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HostTarget {
    pub address: String,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default)]
    pub key_file: Option<String>,

    /// Raw terminal escape sequence, e.g. `"\u001b[0;34m"`.
    #[serde(default)]
    pub color: Option<String>,
}

impl HostTarget {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Self::default()
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_key_file(mut self, key_file: impl Into<String>) -> Self {
        self.key_file = Some(key_file.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn username(&self) -> Option<&str> {
        non_empty(self.username.as_deref())
    }

    pub fn port(&self) -> Option<u16> {
        self.port.filter(|&p| p != 0)
    }

    pub fn key_file(&self) -> Option<&str> {
        non_empty(self.key_file.as_deref())
    }

    pub fn color(&self) -> Option<&str> {
        non_empty(self.color.as_deref())
    }

    /// `user@address`, falling back to `default_user` when no username is configured.
    pub fn destination(&self, default_user: &str) -> String {
        format!("{}@{}", self.username().unwrap_or(default_user), self.address)
    }
}

impl fmt::Display for HostTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(user) = self.username() {
            write!(f, "{user}@")?;
        }
        write!(f, "{}", self.address)?;
        if let Some(port) = self.port() {
            write!(f, ":{port}")?;
        }
        Ok(())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_fields_are_unset() {
        let host = HostTarget {
            address: "web1".to_string(),
            username: Some(String::new()),
            port: Some(0),
            key_file: Some(String::new()),
            color: Some(String::new()),
        };

        assert_eq!(host.username(), None);
        assert_eq!(host.port(), None);
        assert_eq!(host.key_file(), None);
        assert_eq!(host.color(), None);
    }

    #[test]
    fn test_destination_uses_configured_user() {
        let host = HostTarget::new("10.0.0.1").with_username("admin");
        assert_eq!(host.destination("alice"), "admin@10.0.0.1");
    }

    #[test]
    fn test_destination_falls_back_to_default_user() {
        let host = HostTarget::new("10.0.0.1");
        assert_eq!(host.destination("alice"), "alice@10.0.0.1");
    }

    #[test]
    fn test_display() {
        let host = HostTarget::new("example.com")
            .with_username("admin")
            .with_port(2222);
        assert_eq!(host.to_string(), "admin@example.com:2222");
        assert_eq!(HostTarget::new("example.com").to_string(), "example.com");
    }

    #[test]
    fn test_deserialize_minimal() {
        let host: HostTarget = serde_json::from_str(r#"{"address": "db1"}"#).unwrap();
        assert_eq!(host, HostTarget::new("db1"));
    }

    #[test]
    fn test_deserialize_full() {
        let json = r#"{
            "address": "db1",
            "username": "ops",
            "port": 2200,
            "key_file": "~/.ssh/id_ops",
            "color": "\u001b[0;34m"
        }"#;
        let host: HostTarget = serde_json::from_str(json).unwrap();
        assert_eq!(host.username(), Some("ops"));
        assert_eq!(host.port(), Some(2200));
        assert_eq!(host.key_file(), Some("~/.ssh/id_ops"));
        assert_eq!(host.color(), Some("\x1b[0;34m"));
    }
}
