use std::path::PathBuf;

use thiserror::Error;

/// Run-level failures. Any of these aborts the whole aggregation.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to open input '{path}': {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to map input '{path}' into memory: {source}")]
    FileMap {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Worker count must be at least 1 (got {0})")]
    InvalidWorkerCount(usize),

    #[error("Byte range {start}..{end} is outside of input of size {size}")]
    InvalidRange { start: u64, end: u64, size: u64 },

    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    #[error("Running sum for key '{key}' exceeds the decimal range")]
    SumOverflow { key: String },
}

pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    pub(crate) fn overflow(key: &[u8]) -> Self {
        Self::SumOverflow {
            key: String::from_utf8_lossy(key).into_owned(),
        }
    }
}

/// Per-record rejection. Recovered locally: the record is dropped and counted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("Record has no ';' delimiter")]
    MalformedRecord,

    #[error("Value '{value}' is not a decimal number")]
    InvalidValue { value: String },
}

impl RecordError {
    pub(crate) fn invalid_value(raw: &[u8]) -> Self {
        Self::InvalidValue {
            value: String::from_utf8_lossy(raw).into_owned(),
        }
    }
}
