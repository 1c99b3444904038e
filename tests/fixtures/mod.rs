//! Shared test fixtures: a recording fake `Shell` so orchestrator and
//! executor behavior can be asserted without spawning real processes.

use async_trait::async_trait;
use repo_fleet::{CommandOutput, FleetConfig, GitError, RepoSpec, Shell};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl RecordedCall {
    pub fn subcommand(&self) -> Option<&str> {
        if self.program == "git" {
            self.args.first().map(String::as_str)
        } else {
            None
        }
    }
}

/// Fake `Shell` that records every invocation and replies with canned output.
///
/// Defaults: every git command succeeds, the current branch is `main`, the
/// configured remote is empty, and the SSH probe reports successful
/// authentication (with a non-zero exit, like the real probe).
pub struct RecordingShell {
    calls: Mutex<Vec<RecordedCall>>,
    remote_url: Option<String>,
    fail_containing: Vec<String>,
    authenticated: bool,
    delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl RecordingShell {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            remote_url: None,
            fail_containing: Vec::new(),
            authenticated: true,
            delay: Duration::ZERO,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_remote_url(mut self, url: &str) -> Self {
        self.remote_url = Some(url.to_string());
        self
    }

    /// Any invocation whose joined command line contains `needle` fails.
    pub fn failing_on(mut self, needle: &str) -> Self {
        self.fail_containing.push(needle.to_string());
        self
    }

    pub fn unauthenticated(mut self) -> Self {
        self.authenticated = false;
        self
    }

    /// Hold each invocation open for a while so concurrency can be observed.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Number of git invocations whose first argument is `subcommand`.
    pub fn count_git(&self, subcommand: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.subcommand() == Some(subcommand))
            .count()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Shell for RecordingShell {
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: Option<&Path>,
    ) -> Result<CommandOutput, GitError> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        self.calls.lock().unwrap().push(RecordedCall {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            cwd: cwd.map(Path::to_path_buf),
        });

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if program == "ssh" {
            let stderr = if self.authenticated {
                "Hi fleet-operator! You've successfully authenticated, but GitHub \
                 does not provide shell access."
            } else {
                "git@github.com: Permission denied (publickey)."
            };
            // the probe exits non-zero even when authentication succeeds
            return Ok(CommandOutput {
                success: false,
                stdout: String::new(),
                stderr: stderr.to_string(),
            });
        }

        let joined = format!("{program} {}", args.join(" "));
        if self.fail_containing.iter().any(|n| joined.contains(n.as_str())) {
            return Ok(CommandOutput {
                success: false,
                stdout: String::new(),
                stderr: "simulated failure".to_string(),
            });
        }

        let stdout = if joined.starts_with("git rev-parse") {
            "main\n".to_string()
        } else if joined.starts_with("git remote get-url") {
            match &self.remote_url {
                Some(url) => format!("{url}\n"),
                None => String::new(),
            }
        } else {
            String::new()
        };

        Ok(CommandOutput {
            success: true,
            stdout,
            stderr: String::new(),
        })
    }
}

pub fn fleet_config(organization: &str, names: &[&str]) -> FleetConfig {
    FleetConfig {
        project_name: "test-project".to_string(),
        organization: organization.to_string(),
        base_dir: "..".to_string(),
        repositories: names
            .iter()
            .map(|name| RepoSpec {
                name: name.to_string(),
                description: None,
            })
            .collect(),
    }
}
