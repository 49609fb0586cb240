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

//! Core parallel executor implementation.

use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;

use crate::host::HostTarget;
use crate::ui::{assign_colors, label_width, OutputFormatter, Palette};

use super::invoker::RemoteInvoker;
use super::output_sync::OutputSink;

/// Counts for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// One host's share of a run. Color and label width are fixed before the job
/// is spawned.
struct DispatchJob {
    host: HostTarget,
    color: String,
    label_width: usize,
    command: Arc<str>,
}

impl DispatchJob {
    /// Invoke, then render every resulting line. Returns whether the command
    /// succeeded.
    async fn run(self, invoker: Arc<RemoteInvoker>, sink: OutputSink) -> bool {
        let started = Instant::now();
        let result = invoker.invoke(&self.host, &self.command).await;

        tracing::debug!(
            host = %self.host.address,
            success = result.is_success(),
            lines = result.stdout.len(),
            "Finished in {:?}",
            started.elapsed()
        );

        let lines = OutputFormatter::format_result(
            &self.host.address,
            self.label_width,
            &self.color,
            &result,
        );
        for line in lines {
            if let Err(e) = sink.write_line(&line) {
                tracing::warn!("Failed to write output for {}: {}", self.host.address, e);
                break;
            }
        }

        result.is_success()
    }
}

/// Runs one command on every host at once and prints each host's output with
/// its label.
///
/// There is no concurrency limit: a run spawns exactly one task per host.
pub struct ParallelExecutor {
    hosts: Vec<HostTarget>,
    invoker: Arc<RemoteInvoker>,
    palette: Palette,
    color_disabled: bool,
}

impl ParallelExecutor {
    /// Create a new parallel executor with the default palette.
    pub fn new(hosts: Vec<HostTarget>, invoker: RemoteInvoker) -> Self {
        Self {
            hosts,
            invoker: Arc::new(invoker),
            palette: Palette::default(),
            color_disabled: false,
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Collapse every color code, explicit ones included, to nothing.
    pub fn with_color_disabled(mut self, color_disabled: bool) -> Self {
        self.color_disabled = color_disabled;
        self
    }

    fn plan(&self, command: &str) -> Vec<DispatchJob> {
        let width = label_width(&self.hosts);
        let colors = assign_colors(&self.hosts, &self.palette, self.color_disabled);
        let command: Arc<str> = Arc::from(command);

        self.hosts
            .iter()
            .cloned()
            .zip(colors)
            .map(|(host, color)| DispatchJob {
                host,
                color,
                label_width: width,
                command: Arc::clone(&command),
            })
            .collect()
    }

    /// Execute a command on all hosts in parallel.
    ///
    /// Returns once every job has written its output, however many failed.
    /// Lines from different hosts may interleave; each host's own lines stay
    /// in order.
    pub async fn execute(&self, command: &str, sink: &OutputSink) -> RunSummary {
        let jobs = self.plan(command);
        tracing::info!("Running {:?} on {} host(s)", command, jobs.len());

        let tasks: Vec<_> = jobs
            .into_iter()
            .map(|job| {
                let invoker = Arc::clone(&self.invoker);
                let sink = sink.clone();
                tokio::spawn(job.run(invoker, sink))
            })
            .collect();

        let results = join_all(tasks).await;
        self.summarize(results)
    }

    /// Count outcomes, treating a panicked task as a failed host.
    fn summarize(&self, results: Vec<Result<bool, tokio::task::JoinError>>) -> RunSummary {
        let mut summary = RunSummary {
            total: results.len(),
            ..RunSummary::default()
        };

        for (idx, result) in results.into_iter().enumerate() {
            match result {
                Ok(true) => summary.succeeded += 1,
                Ok(false) => summary.failed += 1,
                Err(e) => {
                    tracing::error!(
                        "Task failed for host {}: {}",
                        self.hosts
                            .get(idx)
                            .map(|h| h.address.as_str())
                            .unwrap_or("unknown"),
                        e
                    );
                    summary.failed += 1;
                }
            }
        }

        tracing::info!(
            "{} host(s): {} succeeded, {} failed",
            summary.total,
            summary.succeeded,
            summary.failed
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::Transport;

    const RED: &str = "\x1b[0;31m";
    const BLUE: &str = "\x1b[0;34m";

    #[test]
    fn test_plan_resolves_colors_and_width_up_front() {
        let hosts = vec![
            HostTarget::new("10.0.0.1").with_color(""),
            HostTarget::new("10.0.0.2").with_color(BLUE),
        ];
        let executor = ParallelExecutor::new(hosts, RemoteInvoker::new(Transport::default(), "u"))
            .with_palette(Palette::new([RED]));

        let jobs = executor.plan("uptime");
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].color, RED);
        assert_eq!(jobs[1].color, BLUE);
        assert!(jobs.iter().all(|j| j.label_width == 8));
        assert!(jobs.iter().all(|j| &*j.command == "uptime"));
    }

    #[test]
    fn test_plan_with_color_disabled() {
        let hosts = vec![HostTarget::new("a"), HostTarget::new("bb").with_color(BLUE)];
        let executor = ParallelExecutor::new(hosts, RemoteInvoker::new(Transport::default(), "u"))
            .with_color_disabled(true);

        let jobs = executor.plan("true");
        assert!(jobs.iter().all(|j| j.color.is_empty()));
    }

    #[tokio::test]
    async fn test_execute_empty_host_list() {
        let executor =
            ParallelExecutor::new(Vec::new(), RemoteInvoker::new(Transport::default(), "u"));
        let summary = executor
            .execute("true", &OutputSink::new(std::io::sink()))
            .await;
        assert_eq!(summary, RunSummary::default());
        assert!(summary.all_succeeded());
    }

    #[tokio::test]
    async fn test_spawn_failures_are_reported_per_host() {
        let buffer = crate::executor::CaptureBuffer::new();
        let sink = OutputSink::new(buffer.clone());
        let hosts = vec![HostTarget::new("web1"), HostTarget::new("web22")];
        let invoker = RemoteInvoker::new(Transport::new("/nonexistent/pssh-transport"), "u");

        let summary = ParallelExecutor::new(hosts, invoker)
            .execute("true", &sink)
            .await;

        assert_eq!(summary.total, 2);
        assert_eq!(summary.failed, 2);

        let mut lines = buffer.lines();
        lines.sort();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("web1  Error executing command: failed to start"));
        assert!(lines[1].starts_with("web22 Error executing command: failed to start"));
    }
}
