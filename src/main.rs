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

use anyhow::Result;
use clap::{error::ErrorKind, Parser};
use owo_colors::OwoColorize;
use std::env;

use pssh::{
    cli::{Cli, USAGE_HINT},
    config::{resolve_config_path, Config, CONFIG_ENV},
    executor::{resolve_local_username, OutputSink, ParallelExecutor, RemoteInvoker, Transport},
    ui::{color_disabled_by_env, NO_COLOR_ENV},
    utils::init_logging,
};

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            // Usage problems share stdout with every other diagnostic.
            print!("{}", e.render());
            println!();
            println!("{USAGE_HINT}");
            std::process::exit(1);
        }
    };

    init_logging(cli.verbose);

    let color_disabled =
        cli.no_color || color_disabled_by_env(env::var_os(NO_COLOR_ENV).as_deref());

    if let Err(e) = run(cli, color_disabled).await {
        report_fatal(&e, color_disabled);
        std::process::exit(1);
    }
}

/// Everything up to and including the dispatch. Errors returned from here are
/// fatal for the whole run; per-host failures are printed by the executor and
/// do not change the exit code.
async fn run(cli: Cli, color_disabled: bool) -> Result<()> {
    let command = cli.remote_command()?;

    let config_path = resolve_config_path(cli.config.as_deref(), env::var_os(CONFIG_ENV))?;
    let config = Config::load(&config_path).await?;

    // Resolved once here instead of per host; skipped when every host has a user.
    let local_user = if config.needs_local_user() {
        resolve_local_username()?
    } else {
        String::new()
    };

    let transport = Transport::from_env();
    tracing::debug!("Using transport {:?}", transport.program());

    let invoker = RemoteInvoker::new(transport, local_user);
    let executor = ParallelExecutor::new(config.into_hosts(), invoker)
        .with_color_disabled(color_disabled);

    let summary = executor.execute(&command, &OutputSink::stdout()).await;
    if !summary.all_succeeded() {
        tracing::debug!("{} of {} host(s) failed", summary.failed, summary.total);
    }

    Ok(())
}

fn report_fatal(error: &anyhow::Error, color_disabled: bool) {
    let prefix = if color_disabled {
        "Error:".to_string()
    } else {
        "Error:".red().bold().to_string()
    };
    println!("{prefix} {error:#}");
    println!();
    println!("{USAGE_HINT}");
}
