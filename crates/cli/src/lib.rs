// crates/cli/src/lib.rs
#![allow(clippy::multiple_crate_versions)]

pub mod args;
pub mod config;
pub mod discovery;
pub mod error;
pub mod parsers;
pub mod presentation;

use std::time::Instant;

use crate::args::Args;
use crate::config::EngineConfig;
use crate::error::Result;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Resolve the input, aggregate it and emit the formatted lines.
///
/// # Errors
/// Any discovery, engine or output failure; nothing is written on an engine
/// failure.
pub fn execute(args: &Args) -> Result<()> {
    let started = Instant::now();
    let config = EngineConfig::try_from(args)?;
    let result = keystats_engine::run(&config)?;

    if result.report.rejected() > 0 {
        log::warn!(
            "skipped {} malformed and {} invalid-value lines",
            result.report.malformed,
            result.report.invalid
        );
    }

    presentation::emit(&result.lines(), args.output.as_deref())?;

    if args.timing {
        presentation::print_timing(started.elapsed());
    }
    Ok(())
}
