use clap::{Parser, Subcommand, ValueEnum};

pub mod commands;

#[derive(Parser)]
#[command(name = "repo-fleet")]
#[command(about = "Multi-repository fleet management for a single organization")]
#[command(long_about = "repo-fleet clones, updates, and resets a configured fleet of git \
                       repositories, and runs scripted git operations across them. Bulk modes \
                       run up to five repositories at a time; scripted operations run one \
                       repository at a time in configured order.")]
pub struct Cli {
    /// Print the resolved fleet configuration as JSON before running
    #[arg(long, global = true, help = "Dump the resolved configuration as JSON")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clone missing repositories and update existing ones
    Sync,
    /// Reset every repository to a clean remote state after pushing a backup branch
    Nuke {
        /// Report what would be done without touching any repository
        #[arg(long, help = "Report intended actions without invoking git at all")]
        dry_run: bool,
    },
    /// Run scripted git operations across the fleet, one repository at a time
    Ops {
        /// Branch to check out and pull in each repository
        #[arg(long, help = "Check out and pull this branch in each repository")]
        checkout: Option<String>,
        /// Stage and commit changes in each repository
        #[arg(long, requires = "message", help = "Stage and commit changes (requires --message)")]
        commit: bool,
        /// Commit message, required with --commit
        #[arg(long, help = "Commit message to use with --commit")]
        message: Option<String>,
        /// Paths to stage instead of the whole working tree
        #[arg(long, num_args = 1.., help = "Stage only these paths instead of the whole tree")]
        files: Vec<String>,
        /// Push after the other steps
        #[arg(long, help = "Push each repository after the other steps")]
        push: bool,
        /// Branch to push instead of the current one
        #[arg(long, help = "Push this branch instead of the current one")]
        push_branch: Option<String>,
        /// Remote operation to perform in each repository
        #[arg(long, value_enum, help = "Remote operation to perform (add, update, delete)")]
        remote_op: Option<RemoteOperation>,
        /// Remote name for --remote-op
        #[arg(long, help = "Remote name used by --remote-op")]
        remote_name: Option<String>,
        /// Remote URL prefix for --remote-op; the repository name is appended
        #[arg(long, help = "Remote URL prefix used by --remote-op (repository name is appended)")]
        remote_url: Option<String>,
        /// Repository names to leave untouched this run
        #[arg(long, num_args = 1.., help = "Repositories to exclude from this run")]
        exclude: Vec<String>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum RemoteOperation {
    Add,
    Update,
    Delete,
}
