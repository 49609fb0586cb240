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

//! Configuration loading and path resolution.

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::types::Config;
use super::utils::{expand_tilde, home_dir};

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "PSSH_CONFIG";

const MISSING_CONFIG_HINT: &str = "Please create a config file at the above path or set the \
    PSSH_CONFIG environment variable to the path of your config file.";

const PARSE_ERROR_HINT: &str = "Failed to parse config as JSON. \
    Expected an array of host objects, e.g. [{\"address\": \"10.0.0.1\"}]";

/// `~/.config/pssh/config.json`
pub fn default_config_path() -> Result<PathBuf> {
    let home = home_dir().context("Unable to determine home directory")?;
    Ok(home.join(".config").join("pssh").join("config.json"))
}

/// Pick the config file path with priority order:
/// 1. Explicit --config path
/// 2. `PSSH_CONFIG` (ignored when empty)
/// 3. `~/.config/pssh/config.json`
pub fn resolve_config_path(
    cli_path: Option<&Path>,
    env_path: Option<OsString>,
) -> Result<PathBuf> {
    if let Some(path) = cli_path {
        tracing::debug!("Using config file from --config: {:?}", path);
        return Ok(expand_tilde(path));
    }

    if let Some(path) = env_path.filter(|p| !p.is_empty()) {
        tracing::debug!("Using config file from {}: {:?}", CONFIG_ENV, path);
        return Ok(expand_tilde(Path::new(&path)));
    }

    default_config_path()
}

impl Config {
    /// Load and validate the host list from a JSON file.
    ///
    /// A missing file is an error here, unlike a tool that can run with
    /// defaults: there is nothing to do without hosts.
    pub async fn load(path: &Path) -> Result<Self> {
        let expanded_path = expand_tilde(path);

        if !expanded_path.exists() {
            anyhow::bail!(
                "Config file not found at {}\n{}",
                expanded_path.display(),
                MISSING_CONFIG_HINT
            );
        }

        let content = fs::read_to_string(&expanded_path)
            .await
            .with_context(|| format!("Failed to read config file at {}", expanded_path.display()))?;

        let config = Self::from_json(&content)
            .with_context(|| format!("Failed to load config file at {}", expanded_path.display()))?;

        tracing::debug!(
            "Loaded {} host(s) from {}",
            config.len(),
            expanded_path.display()
        );

        Ok(config)
    }

    /// Parse and validate a JSON host list.
    pub fn from_json(content: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(content).context(PARSE_ERROR_HINT)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.is_empty() {
            anyhow::bail!("No hosts found in config file");
        }

        for (idx, host) in self.hosts.iter().enumerate() {
            if host.address.trim().is_empty() {
                anyhow::bail!("Host #{} has an empty address", idx + 1);
            }
        }

        Ok(())
    }
}
