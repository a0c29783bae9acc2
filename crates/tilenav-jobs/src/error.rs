use std::fmt;

/// Errors raised while starting the job runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobsError {
    /// The pool was configured with zero workers.
    NoWorkers,
    /// The OS refused to start a worker thread.
    Spawn(String),
}

impl fmt::Display for JobsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWorkers => f.write_str("worker pool needs at least one worker"),
            Self::Spawn(reason) => write!(f, "failed to spawn worker thread: {reason}"),
        }
    }
}

impl std::error::Error for JobsError {}
