use anyhow::{bail, Result};
use tracing::Instrument;

use crate::cli::commands::{build_orchestrator, show_usage};
use crate::cli::RemoteOperation;
use crate::fleet::{RemoteOp, ScriptedOps};
use crate::telemetry::{create_run_span, generate_run_id};

pub struct OpsCommand {
    pub checkout: Option<String>,
    pub commit: bool,
    pub message: Option<String>,
    pub files: Vec<String>,
    pub push: bool,
    pub push_branch: Option<String>,
    pub remote_op: Option<RemoteOperation>,
    pub remote_name: Option<String>,
    pub remote_url: Option<String>,
    pub exclude: Vec<String>,
    pub debug: bool,
}

impl OpsCommand {
    /// Turn flag soup into a validated operation set. Argument mistakes are
    /// caught here, before any repository is touched.
    fn scripted_ops(&self) -> Result<ScriptedOps> {
        let commit_message = if self.commit {
            match &self.message {
                Some(message) if !message.trim().is_empty() => Some(message.clone()),
                _ => bail!("--commit requires a non-empty --message"),
            }
        } else {
            None
        };

        let remote = match self.remote_op {
            None => None,
            Some(RemoteOperation::Add) => match (&self.remote_name, &self.remote_url) {
                (Some(name), Some(url)) => Some(RemoteOp::Add {
                    name: name.clone(),
                    url: url.clone(),
                }),
                _ => bail!("--remote-op add requires --remote-name and --remote-url"),
            },
            Some(RemoteOperation::Update) => match (&self.remote_name, &self.remote_url) {
                (Some(name), Some(url)) => Some(RemoteOp::Update {
                    name: name.clone(),
                    url: url.clone(),
                }),
                _ => bail!("--remote-op update requires --remote-name and --remote-url"),
            },
            Some(RemoteOperation::Delete) => match &self.remote_name {
                Some(name) => Some(RemoteOp::Delete { name: name.clone() }),
                None => bail!("--remote-op delete requires --remote-name"),
            },
        };

        Ok(ScriptedOps {
            checkout: self.checkout.clone(),
            commit_message,
            stage_paths: self.files.clone(),
            push: self.push,
            push_branch: self.push_branch.clone(),
            remote,
            exclude: self.exclude.clone(),
        })
    }

    pub async fn execute(&self) -> Result<()> {
        let ops = self.scripted_ops()?;
        if ops.is_empty() {
            println!("Nothing to do: pass --checkout, --commit, --push, or --remote-op.");
            println!();
            return show_usage();
        }

        let orchestrator = build_orchestrator(self.debug)?;
        println!(
            "🛠️  Running scripted operations for project: {}",
            orchestrator.config().project_name
        );

        let run_id = generate_run_id();
        orchestrator
            .run_scripted(&ops)
            .instrument(create_run_span("ops", &run_id))
            .await?;
        Ok(())
    }
}
