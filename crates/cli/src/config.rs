// crates/cli/src/config.rs
use crate::args::Args;
use crate::discovery;
use crate::error::{AppError, Result};
pub use keystats_engine::config::{EngineConfig, EngineConfigBuilder, default_workers};

impl TryFrom<&Args> for EngineConfig {
    type Error = AppError;

    fn try_from(args: &Args) -> Result<Self> {
        // clap guarantees exactly one source is present
        let input = match (&args.input, &args.latest_in) {
            (Some(path), _) => path.clone(),
            (None, Some(dir)) => discovery::find_latest(dir, &args.prefix)?,
            (None, None) => {
                return Err(AppError::NoInputFound {
                    dir: ".".into(),
                    prefix: args.prefix.clone(),
                });
            }
        };

        Ok(Self {
            input,
            workers: args.workers.unwrap_or_else(default_workers),
            threads: args.threads,
        })
    }
}
