use std::path::PathBuf;

use thiserror::Error;

pub type BenchResult<T> = Result<T, BenchError>;

/// Errors that abort a benchmark run.
///
/// Per-request transport failures are not errors at this level: a worker
/// only counts them.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("worker count must be at least 1, got {0}")]
    InvalidWorkerCount(usize),
    #[error("failed to read request list '{path}': {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("latency histogram error: {0}")]
    Histogram(String),
    #[error("worker task failed: {source}")]
    Join {
        #[from]
        source: tokio::task::JoinError,
    },
}

impl From<hdrhistogram::CreationError> for BenchError {
    fn from(err: hdrhistogram::CreationError) -> Self {
        BenchError::Histogram(format!("{:?}", err))
    }
}

impl From<hdrhistogram::AdditionError> for BenchError {
    fn from(err: hdrhistogram::AdditionError) -> Self {
        BenchError::Histogram(format!("{:?}", err))
    }
}
