//! Repository operation executor.
//!
//! A stateless set of version-control actions, each shelling out against one
//! working directory and reporting success or failure. Operations never
//! aggregate across repositories and never retry; serializing access to a
//! single working directory is the caller's responsibility.

use chrono::{DateTime, Local};
use std::path::Path;
use std::sync::Arc;

use super::errors::GitError;
use super::shell::{CommandOutput, Shell, SystemShell};

/// Host every fleet remote lives on.
pub const GIT_HOST: &str = "github.com";

/// SSH-style remote address for a repository within an organization.
pub fn remote_address(organization: &str, name: &str) -> String {
    format!("git@{GIT_HOST}:{organization}/{name}.git")
}

fn backup_branch_name(branch: &str, now: DateTime<Local>) -> String {
    format!("{branch}_backup_{}", now.format("%Y%m%d_%H%M%S"))
}

pub struct GitExecutor {
    shell: Arc<dyn Shell>,
}

impl GitExecutor {
    pub fn new(shell: Arc<dyn Shell>) -> Self {
        Self { shell }
    }

    /// Executor wired to the real `git`/`ssh` binaries.
    pub fn system() -> Self {
        Self::new(Arc::new(SystemShell::new()))
    }

    async fn git(
        &self,
        dir: &Path,
        args: &[&str],
        operation: &str,
    ) -> Result<CommandOutput, GitError> {
        let output = self.shell.run("git", args, Some(dir)).await?;
        if output.success {
            Ok(output)
        } else {
            Err(GitError::CommandFailed {
                operation: operation.to_string(),
                stderr: output.stderr.trim().to_string(),
            })
        }
    }

    /// Probe SSH authentication to the git host.
    ///
    /// The probe exits non-zero even on success (no shell access is granted),
    /// so only the banner on stderr is trusted.
    pub async fn verify_ssh_access(&self) -> Result<bool, GitError> {
        let host = format!("git@{GIT_HOST}");
        let output = self.shell.run("ssh", &["-T", &host], None).await?;
        Ok(output
            .stderr
            .to_lowercase()
            .contains("successfully authenticated"))
    }

    /// Whether the configured `origin` URL matches `expected` byte-for-byte
    /// after trimming. A repository whose remote cannot be read counts as a
    /// mismatch and is left for manual review.
    pub async fn remote_matches(&self, dir: &Path, expected: &str) -> Result<bool, GitError> {
        let output = self
            .shell
            .run("git", &["remote", "get-url", "origin"], Some(dir))
            .await?;
        if !output.success {
            return Ok(false);
        }
        Ok(output.stdout.trim() == expected.trim())
    }

    pub async fn clone_into(
        &self,
        organization: &str,
        name: &str,
        dir: &Path,
    ) -> Result<(), GitError> {
        let remote = remote_address(organization, name);
        let target = dir.display().to_string();
        let output = self
            .shell
            .run("git", &["clone", &remote, &target], None)
            .await?;
        if output.success {
            Ok(())
        } else {
            Err(GitError::CommandFailed {
                operation: format!("clone {remote}"),
                stderr: output.stderr.trim().to_string(),
            })
        }
    }

    pub async fn current_branch(&self, dir: &Path) -> Result<String, GitError> {
        let output = self
            .git(dir, &["rev-parse", "--abbrev-ref", "HEAD"], "query current branch")
            .await?;
        Ok(output.stdout.trim().to_string())
    }

    /// Fetch, then pull the currently checked-out branch from origin.
    ///
    /// No rollback on failure; the working directory may be left partially
    /// updated.
    pub async fn sync_existing(&self, dir: &Path) -> Result<(), GitError> {
        self.git(dir, &["fetch"], "fetch").await?;
        let branch = self.current_branch(dir).await?;
        self.git(dir, &["pull", "origin", &branch], "pull").await?;
        Ok(())
    }

    /// Create a timestamped backup branch, push it to origin, and switch back
    /// to the original branch. Returns the backup branch name.
    ///
    /// Partial state (branch created locally but push failed) is not rolled
    /// back.
    pub async fn create_backup_branch(&self, dir: &Path) -> Result<String, GitError> {
        let original = self.current_branch(dir).await?;
        let backup = backup_branch_name(&original, Local::now());
        self.git(dir, &["checkout", "-b", &backup], "create backup branch")
            .await?;
        self.git(dir, &["push", "origin", &backup], "push backup branch")
            .await?;
        self.git(dir, &["checkout", &original], "restore original branch")
            .await?;
        Ok(backup)
    }

    /// Irreversibly reset the working tree to `origin/{branch}` and remove
    /// all untracked files and directories. Callers must have pushed a backup
    /// branch first.
    pub async fn hard_reset_and_clean(&self, dir: &Path, branch: &str) -> Result<(), GitError> {
        let target = format!("origin/{branch}");
        self.git(dir, &["reset", "--hard", &target], "hard reset")
            .await?;
        self.git(dir, &["clean", "-fd"], "clean untracked files").await?;
        Ok(())
    }

    /// Stage the given paths, or the entire working tree when none are given.
    pub async fn stage_changes(&self, dir: &Path, paths: &[String]) -> Result<(), GitError> {
        let mut args: Vec<&str> = vec!["add"];
        if paths.is_empty() {
            args.push(".");
        } else {
            args.push("--");
            args.extend(paths.iter().map(String::as_str));
        }
        self.git(dir, &args, "stage changes").await?;
        Ok(())
    }

    pub async fn commit_changes(&self, dir: &Path, message: &str) -> Result<(), GitError> {
        self.git(
            dir,
            &["commit", "-m", message, "--allow-empty"],
            "commit changes",
        )
        .await?;
        Ok(())
    }

    /// Push the current branch, or `origin/{branch}` when a branch is given.
    pub async fn push_changes(&self, dir: &Path, branch: Option<&str>) -> Result<(), GitError> {
        match branch {
            Some(branch) => self.git(dir, &["push", "origin", branch], "push").await?,
            None => self.git(dir, &["push"], "push").await?,
        };
        Ok(())
    }

    /// Fetch all remote branches, check out the named branch, then pull it.
    pub async fn checkout_and_pull(&self, dir: &Path, branch: &str) -> Result<(), GitError> {
        self.git(dir, &["fetch", "--all"], "fetch all remotes").await?;
        self.git(dir, &["checkout", branch], "checkout branch").await?;
        self.git(dir, &["pull", "origin", branch], "pull branch").await?;
        Ok(())
    }

    pub async fn add_remote(&self, dir: &Path, name: &str, url: &str) -> Result<(), GitError> {
        self.git(dir, &["remote", "add", name, url], "add remote").await?;
        Ok(())
    }

    pub async fn set_remote_url(&self, dir: &Path, name: &str, url: &str) -> Result<(), GitError> {
        self.git(dir, &["remote", "set-url", name, url], "update remote")
            .await?;
        Ok(())
    }

    pub async fn remove_remote(&self, dir: &Path, name: &str) -> Result<(), GitError> {
        self.git(dir, &["remote", "remove", name], "remove remote").await?;
        Ok(())
    }
}
