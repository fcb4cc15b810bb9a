use thiserror::Error;

/// Failure modes of one sandboxed invocation. Load, Runtime, Timeout and
/// ResourceExceeded are all catchable by the orchestrator and fold into an
/// error-status result; none of them are process-fatal.
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Failed to spawn sandbox: {0}")]
    Spawn(String),

    #[error("Load error: {0}")]
    Load(String),

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("Submission exceeded timeout ({0}s)")]
    Timeout(u64),

    #[error("Resource limit exceeded: {0}")]
    ResourceExceeded(String),

    #[error("Malformed sandbox reply: {0}")]
    Protocol(String),
}

pub type RunnerResult<T> = std::result::Result<T, RunnerError>;
