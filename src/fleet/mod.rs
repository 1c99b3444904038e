//! Fleet orchestrator.
//!
//! Owns the repository list and the bounded concurrency gate. One tokio task
//! per repository; each task holds one of five permits for the whole of its
//! workflow, and the run joins every task before reporting completion.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::config::{FleetConfig, RepoSpec};
use crate::git::{remote_address, GitExecutor};

pub mod scripted;

pub use scripted::{RemoteOp, ScriptedOps};

/// Cap on simultaneously in-flight repository workflows.
pub const MAX_CONCURRENT_REPOS: usize = 5;

/// Which workflow a run applies to every repository. Chosen once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Clone missing repositories, update existing ones
    Sync,
    /// Push a backup branch, then reset hard and clean
    Nuke { dry_run: bool },
}

impl RunMode {
    pub fn label(&self) -> &'static str {
        match self {
            RunMode::Sync => "Fleet initialization",
            RunMode::Nuke { dry_run: true } => "Nuke simulation",
            RunMode::Nuke { dry_run: false } => "Fleet nuke",
        }
    }
}

/// Per-operation result, consumed only for console reporting.
#[derive(Debug, Clone)]
pub struct OperationOutcome {
    pub repository: String,
    pub succeeded: bool,
    pub message: String,
}

impl OperationOutcome {
    fn ok(repository: &str, message: impl Into<String>) -> Self {
        Self {
            repository: repository.to_string(),
            succeeded: true,
            message: message.into(),
        }
    }

    fn failed(repository: &str, message: impl Into<String>) -> Self {
        Self {
            repository: repository.to_string(),
            succeeded: false,
            message: message.into(),
        }
    }

    pub fn report(&self) {
        if self.succeeded {
            println!("✅ {}: {}", self.repository, self.message);
        } else {
            println!("❌ {}: {}", self.repository, self.message);
        }
    }
}

pub struct FleetOrchestrator {
    pub(crate) config: FleetConfig,
    pub(crate) base_dir: PathBuf,
    pub(crate) executor: Arc<GitExecutor>,
}

impl FleetOrchestrator {
    pub fn new(config: FleetConfig, base_dir: PathBuf, executor: Arc<GitExecutor>) -> Self {
        Self {
            config,
            base_dir,
            executor,
        }
    }

    pub fn config(&self) -> &FleetConfig {
        &self.config
    }

    /// Run one fleet-wide workflow and return every outcome.
    ///
    /// A live run begins with a single SSH authentication probe; probe
    /// failure aborts before any repository is processed. A simulation skips
    /// the probe so that it invokes no subprocess at all.
    pub async fn run(&self, mode: RunMode) -> Result<Vec<OperationOutcome>> {
        let simulate = matches!(mode, RunMode::Nuke { dry_run: true });
        if !simulate {
            self.verify_ssh_access().await?;
        }

        let permits = Arc::new(Semaphore::new(MAX_CONCURRENT_REPOS));
        let mut tasks = JoinSet::new();

        for repo in self.config.repositories.clone() {
            let permits = Arc::clone(&permits);
            let executor = Arc::clone(&self.executor);
            let organization = self.config.organization.clone();
            let dir = self.base_dir.join(&repo.name);

            tasks.spawn(async move {
                let _permit = match permits.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        return vec![OperationOutcome::failed(
                            &repo.name,
                            "concurrency gate closed before the workflow started",
                        )]
                    }
                };
                match mode {
                    RunMode::Sync => sync_or_clone(&executor, &organization, &repo, &dir).await,
                    RunMode::Nuke { dry_run } => nuke(&executor, &repo, &dir, dry_run).await,
                }
            });
        }

        let mut outcomes = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(repo_outcomes) => {
                    for outcome in &repo_outcomes {
                        outcome.report();
                    }
                    outcomes.extend(repo_outcomes);
                }
                Err(e) => warn!("repository workflow task failed to join: {e}"),
            }
        }

        info!(mode = mode.label(), outcomes = outcomes.len(), "fleet run finished");
        println!("\n✅ {} complete!", mode.label());
        Ok(outcomes)
    }

    pub(crate) async fn verify_ssh_access(&self) -> Result<()> {
        println!("🔐 Verifying SSH access to {}...", crate::git::GIT_HOST);
        let authenticated = self
            .executor
            .verify_ssh_access()
            .await
            .context("SSH authentication probe failed to run")?;
        if !authenticated {
            bail!(
                "SSH authentication to {} failed; check your SSH configuration",
                crate::git::GIT_HOST
            );
        }
        println!("✅ SSH access verified");
        Ok(())
    }
}

/// Sync-or-clone workflow for one repository.
///
/// Directory existence at dispatch time is the sole branch point; a remote
/// mismatch halts automated action on that repository and is never
/// auto-corrected.
async fn sync_or_clone(
    executor: &GitExecutor,
    organization: &str,
    repo: &RepoSpec,
    dir: &Path,
) -> Vec<OperationOutcome> {
    if dir.exists() {
        let expected = remote_address(organization, &repo.name);
        match executor.remote_matches(dir, &expected).await {
            Ok(true) => match executor.sync_existing(dir).await {
                Ok(()) => vec![OperationOutcome::ok(&repo.name, "updated from origin")],
                Err(e) => vec![OperationOutcome::failed(
                    &repo.name,
                    format!("update failed: {e}"),
                )],
            },
            Ok(false) => {
                warn!(repository = %repo.name, expected = %expected, "remote mismatch");
                vec![OperationOutcome::failed(
                    &repo.name,
                    format!("remote does not match {expected}; please review manually"),
                )]
            }
            Err(e) => vec![OperationOutcome::failed(
                &repo.name,
                format!("remote check failed: {e}"),
            )],
        }
    } else {
        match executor.clone_into(organization, &repo.name, dir).await {
            Ok(()) => vec![OperationOutcome::ok(&repo.name, "cloned")],
            Err(e) => vec![OperationOutcome::failed(
                &repo.name,
                format!("clone failed: {e}"),
            )],
        }
    }
}

/// Backup-and-nuke workflow for one repository.
///
/// The destructive reset runs only after the backup branch was pushed; a
/// failed backup skips the reset entirely.
async fn nuke(
    executor: &GitExecutor,
    repo: &RepoSpec,
    dir: &Path,
    dry_run: bool,
) -> Vec<OperationOutcome> {
    if !dir.exists() {
        return vec![OperationOutcome::ok(
            &repo.name,
            "skipped: no working directory",
        )];
    }

    if dry_run {
        return vec![
            OperationOutcome::ok(&repo.name, "would create and push a timestamped backup branch"),
            OperationOutcome::ok(&repo.name, "would hard-reset to the remote branch"),
            OperationOutcome::ok(&repo.name, "would remove untracked files and directories"),
        ];
    }

    match executor.create_backup_branch(dir).await {
        Ok(backup) => {
            let mut outcomes = vec![OperationOutcome::ok(
                &repo.name,
                format!("backup branch {backup} pushed to origin"),
            )];
            // reset against whichever branch is current at reset time
            match executor.current_branch(dir).await {
                Ok(branch) => match executor.hard_reset_and_clean(dir, &branch).await {
                    Ok(()) => outcomes.push(OperationOutcome::ok(
                        &repo.name,
                        format!("reset to origin/{branch} and cleaned"),
                    )),
                    Err(e) => outcomes.push(OperationOutcome::failed(
                        &repo.name,
                        format!("reset failed: {e}"),
                    )),
                },
                Err(e) => outcomes.push(OperationOutcome::failed(
                    &repo.name,
                    format!("could not determine branch to reset: {e}"),
                )),
            }
            outcomes
        }
        Err(e) => vec![OperationOutcome::failed(
            &repo.name,
            format!("backup failed, destructive reset skipped: {e}"),
        )],
    }
}
