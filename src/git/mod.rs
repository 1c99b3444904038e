//! Git operations module
//!
//! Shells out to the external `git`/`ssh` binaries through a trait-based
//! subprocess seam; exit status and captured stderr are the only signals
//! consumed.

pub mod errors;
pub mod executor;
pub mod shell;

pub use errors::GitError;
pub use executor::{remote_address, GitExecutor, GIT_HOST};
pub use shell::{CommandOutput, Shell, SystemShell};
