use anyhow::Result;
use tracing::Instrument;

use crate::cli::commands::build_orchestrator;
use crate::fleet::RunMode;
use crate::telemetry::{create_run_span, generate_run_id};

pub struct SyncCommand {
    pub debug: bool,
}

impl SyncCommand {
    pub fn new(debug: bool) -> Self {
        Self { debug }
    }

    pub async fn execute(&self) -> Result<()> {
        let orchestrator = build_orchestrator(self.debug)?;
        println!("🚀 Initializing project: {}", orchestrator.config().project_name);

        let run_id = generate_run_id();
        orchestrator
            .run(RunMode::Sync)
            .instrument(create_run_span("sync", &run_id))
            .await?;
        Ok(())
    }
}
