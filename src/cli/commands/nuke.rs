use anyhow::Result;
use tracing::Instrument;

use crate::cli::commands::build_orchestrator;
use crate::fleet::RunMode;
use crate::telemetry::{create_run_span, generate_run_id};

pub struct NukeCommand {
    pub dry_run: bool,
    pub debug: bool,
}

impl NukeCommand {
    pub fn new(dry_run: bool, debug: bool) -> Self {
        Self { dry_run, debug }
    }

    pub async fn execute(&self) -> Result<()> {
        let orchestrator = build_orchestrator(self.debug)?;
        if self.dry_run {
            println!(
                "🔎 Simulating nuke of project: {}",
                orchestrator.config().project_name
            );
        } else {
            println!(
                "💣 Nuking project: {} (backup branches will be pushed first)",
                orchestrator.config().project_name
            );
        }

        let run_id = generate_run_id();
        orchestrator
            .run(RunMode::Nuke {
                dry_run: self.dry_run,
            })
            .instrument(create_run_span("nuke", &run_id))
            .await?;
        Ok(())
    }
}
