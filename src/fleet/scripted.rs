//! Scripted operations across the fleet.
//!
//! Unlike bulk sync, these are operator-directed and order-sensitive, so
//! repositories are processed strictly one at a time in configured fleet
//! order. Individual step failures are reported and never stop the run.

use anyhow::Result;
use tracing::info;

use super::{FleetOrchestrator, OperationOutcome};

/// Remote management action applied per repository. The repository name is
/// appended to the configured URL prefix.
#[derive(Debug, Clone)]
pub enum RemoteOp {
    Add { name: String, url: String },
    Update { name: String, url: String },
    Delete { name: String },
}

/// Operator-selected subset of scripted steps for one run.
#[derive(Debug, Clone, Default)]
pub struct ScriptedOps {
    /// Branch to check out and pull before anything else
    pub checkout: Option<String>,
    /// Stage and commit with this message
    pub commit_message: Option<String>,
    /// Paths to stage; empty means the whole working tree
    pub stage_paths: Vec<String>,
    /// Push after the other steps
    pub push: bool,
    /// Push this branch instead of the current one
    pub push_branch: Option<String>,
    pub remote: Option<RemoteOp>,
    /// Repository names left untouched this run
    pub exclude: Vec<String>,
}

impl ScriptedOps {
    pub fn is_empty(&self) -> bool {
        self.checkout.is_none()
            && self.commit_message.is_none()
            && !self.push
            && self.remote.is_none()
    }
}

impl FleetOrchestrator {
    /// Run the selected steps against each repository in fleet order.
    pub async fn run_scripted(&self, ops: &ScriptedOps) -> Result<Vec<OperationOutcome>> {
        let mut outcomes = Vec::new();

        for repo in &self.config.repositories {
            if ops.exclude.iter().any(|name| name == &repo.name) {
                println!("⏭️  Skipping {} (excluded)", repo.name);
                continue;
            }
            let dir = self.base_dir.join(&repo.name);
            if !dir.exists() {
                println!("⏭️  Skipping {} (no working directory)", repo.name);
                continue;
            }

            println!("\n📦 Processing repository: {}", repo.name);

            if let Some(branch) = &ops.checkout {
                let outcome = match self.executor.checkout_and_pull(&dir, branch).await {
                    Ok(()) => OperationOutcome::ok(&repo.name, format!("checked out {branch}")),
                    Err(e) => {
                        OperationOutcome::failed(&repo.name, format!("checkout failed: {e}"))
                    }
                };
                outcome.report();
                outcomes.push(outcome);
            }

            if let Some(message) = &ops.commit_message {
                let staged = self.executor.stage_changes(&dir, &ops.stage_paths).await;
                let outcome = match staged {
                    Ok(()) => match self.executor.commit_changes(&dir, message).await {
                        Ok(()) => OperationOutcome::ok(&repo.name, "changes committed"),
                        Err(e) => {
                            OperationOutcome::failed(&repo.name, format!("commit failed: {e}"))
                        }
                    },
                    Err(e) => OperationOutcome::failed(&repo.name, format!("stage failed: {e}")),
                };
                outcome.report();
                outcomes.push(outcome);
            }

            if ops.push {
                let branch = ops.push_branch.as_deref();
                let outcome = match self.executor.push_changes(&dir, branch).await {
                    Ok(()) => OperationOutcome::ok(&repo.name, "pushed to origin"),
                    Err(e) => OperationOutcome::failed(&repo.name, format!("push failed: {e}")),
                };
                outcome.report();
                outcomes.push(outcome);
            }

            if let Some(remote) = &ops.remote {
                let outcome = match remote {
                    RemoteOp::Add { name, url } => {
                        let url = format!("{url}{}", repo.name);
                        match self.executor.add_remote(&dir, name, &url).await {
                            Ok(()) => OperationOutcome::ok(
                                &repo.name,
                                format!("remote {name} added ({url})"),
                            ),
                            Err(e) => OperationOutcome::failed(
                                &repo.name,
                                format!("adding remote {name} failed: {e}"),
                            ),
                        }
                    }
                    RemoteOp::Update { name, url } => {
                        let url = format!("{url}{}", repo.name);
                        match self.executor.set_remote_url(&dir, name, &url).await {
                            Ok(()) => OperationOutcome::ok(
                                &repo.name,
                                format!("remote {name} updated ({url})"),
                            ),
                            Err(e) => OperationOutcome::failed(
                                &repo.name,
                                format!("updating remote {name} failed: {e}"),
                            ),
                        }
                    }
                    RemoteOp::Delete { name } => {
                        match self.executor.remove_remote(&dir, name).await {
                            Ok(()) => {
                                OperationOutcome::ok(&repo.name, format!("remote {name} removed"))
                            }
                            Err(e) => OperationOutcome::failed(
                                &repo.name,
                                format!("removing remote {name} failed: {e}"),
                            ),
                        }
                    }
                };
                outcome.report();
                outcomes.push(outcome);
            }
        }

        info!(outcomes = outcomes.len(), "scripted run finished");
        println!("\n✅ Scripted operations complete!");
        Ok(outcomes)
    }
}
