use anyhow::Result;
use clap::Parser;

use repo_fleet::cli::commands::{nuke::NukeCommand, ops::OpsCommand, show_usage, sync::SyncCommand};
use repo_fleet::cli::{Cli, Commands};
use repo_fleet::config::FleetConfig;
use repo_fleet::telemetry::init_telemetry;

fn main() -> Result<()> {
    FleetConfig::load_env_file()?;
    init_telemetry()?;

    let cli = Cli::parse();

    match cli.command {
        None => show_usage(),
        Some(Commands::Sync) => tokio::runtime::Runtime::new()?
            .block_on(async { SyncCommand::new(cli.debug).execute().await }),
        Some(Commands::Nuke { dry_run }) => tokio::runtime::Runtime::new()?
            .block_on(async { NukeCommand::new(dry_run, cli.debug).execute().await }),
        Some(Commands::Ops {
            checkout,
            commit,
            message,
            files,
            push,
            push_branch,
            remote_op,
            remote_name,
            remote_url,
            exclude,
        }) => tokio::runtime::Runtime::new()?.block_on(async {
            OpsCommand {
                checkout,
                commit,
                message,
                files,
                push,
                push_branch,
                remote_op,
                remote_name,
                remote_url,
                exclude,
                debug: cli.debug,
            }
            .execute()
            .await
        }),
    }
}
