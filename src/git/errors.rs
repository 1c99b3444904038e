use thiserror::Error;

/// Errors produced by the repository operation executor.
///
/// Tool failures carry the captured stderr verbatim; nothing is parsed or
/// classified beyond "the subprocess reported failure".
#[derive(Debug, Error)]
pub enum GitError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{operation} failed: {stderr}")]
    CommandFailed { operation: String, stderr: String },
}
