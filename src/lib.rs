// repo-fleet library - multi-repository fleet orchestration
// This exposes the core components for testing and integration

pub mod cli;
pub mod config;
pub mod fleet;
pub mod git;
pub mod telemetry;

// Re-export key types for easy access
pub use config::{FleetConfig, RepoSpec};
pub use fleet::{
    FleetOrchestrator, OperationOutcome, RemoteOp, RunMode, ScriptedOps, MAX_CONCURRENT_REPOS,
};
pub use git::{remote_address, CommandOutput, GitError, GitExecutor, Shell, SystemShell};
pub use telemetry::{create_run_span, generate_run_id, init_telemetry};
