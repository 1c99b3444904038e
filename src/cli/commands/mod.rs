use anyhow::Result;
use std::sync::Arc;

use crate::config::FleetConfig;
use crate::fleet::FleetOrchestrator;
use crate::git::GitExecutor;

pub mod nuke;
pub mod ops;
pub mod sync;

/// Load and validate the fleet configuration, optionally dumping it, and wire
/// up an orchestrator against the real git binary.
pub fn build_orchestrator(debug: bool) -> Result<FleetOrchestrator> {
    let config = FleetConfig::load()?;

    if debug {
        println!("Configuration:");
        println!("{}", serde_json::to_string_pretty(&config)?);
    }

    let base_dir = config.resolved_base_dir()?;
    Ok(FleetOrchestrator::new(
        config,
        base_dir,
        Arc::new(GitExecutor::system()),
    ))
}

pub fn show_usage() -> Result<()> {
    println!("🚀 repo-fleet - Multi-Repository Fleet Management");
    println!();
    println!("To get started:");
    println!("  📦 repo-fleet sync             # Clone missing repositories, update the rest");
    println!("  💣 repo-fleet nuke --dry-run   # Preview a reset to clean remote state");
    println!("  🛠️  repo-fleet ops --checkout main --push");
    println!("                                 # Scripted git operations, one repo at a time");
    println!();
    println!("Configuration lives in fleet.toml (or .fleet-rc), overridable via FLEET_* env vars.");
    Ok(())
}
