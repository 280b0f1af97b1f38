// crates/cli/src/error.rs
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Engine(#[from] keystats_engine::error::EngineError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No file starting with '{prefix}' found in '{dir}'")]
    NoInputFound { dir: PathBuf, prefix: String },

    #[error("Failed to scan '{dir}': {source}")]
    Discovery {
        dir: PathBuf,
        #[source]
        source: ignore::Error,
    },

    #[error("Failed to write output '{path}': {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, AppError>;
