// crates/engine/src/lib.rs
//! Parallel per-key min/mean/max aggregation over `<key>;<value>` files.
//!
//! The input is split into byte ranges ([`planner`]), each range is scanned
//! independently on the rayon pool ([`scanner`]), and the partial maps are
//! folded together once every scan has finished ([`merge`]). [`format`]
//! renders the final map.

use log::info;
use rayon::prelude::*;

pub mod config;
pub mod error;
pub mod format;
pub mod merge;
pub mod parser;
pub mod planner;
pub mod scanner;
pub mod source;
pub mod stats;

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::planner::ByteRange;
use crate::scanner::ScanReport;
use crate::source::InputFile;
use crate::stats::StatsMap;

/// Outcome of a successful run. An empty `stats` is a valid result.
#[derive(Debug, Clone, Default)]
pub struct RunResult {
    pub stats: StatsMap,
    pub report: ScanReport,
    pub bytes: u64,
    pub ranges: usize,
}

impl RunResult {
    /// Formatted output lines in key order.
    pub fn lines(&self) -> Vec<String> {
        format::format(&self.stats)
    }
}

/// Aggregate the configured input file.
///
/// # Errors
///
/// Any I/O failure opening or mapping the input, a thread pool that cannot be
/// built, or a sum overflow. No partial result is returned in that case.
pub fn run(config: &EngineConfig) -> Result<RunResult> {
    let input = InputFile::open(&config.input)?;
    let bytes = input.size();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.pool_threads())
        .build()
        .map_err(|e| EngineError::ThreadPool(e.to_string()))?;

    let ranges = planner::plan(bytes, config.workers)?;
    let (stats, report) = pool.install(|| aggregate_ranges(input.bytes(), &ranges))?;
    drop(input);

    info!(
        "{}: {bytes} bytes in {} ranges, {} records, {} keys, {} rejected",
        config.input.display(),
        ranges.len(),
        report.records,
        stats.len(),
        report.rejected()
    );

    Ok(RunResult {
        stats,
        report,
        bytes,
        ranges: ranges.len(),
    })
}

/// Aggregate an in-memory buffer split into `workers` ranges.
///
/// # Errors
///
/// [`EngineError::InvalidWorkerCount`] for zero workers, otherwise as
/// [`aggregate_ranges`].
pub fn aggregate(data: &[u8], workers: usize) -> Result<(StatsMap, ScanReport)> {
    let ranges = planner::plan(data.len() as u64, workers)?;
    aggregate_ranges(data, &ranges)
}

/// Scan every range in parallel, then merge.
///
/// `ranges` must be contiguous and cover `data` exactly once for the result to
/// count every record exactly once; their split points may fall anywhere.
///
/// # Errors
///
/// The first scan error aborts the whole aggregation.
pub fn aggregate_ranges(data: &[u8], ranges: &[ByteRange]) -> Result<(StatsMap, ScanReport)> {
    let partials = ranges
        .par_iter()
        .map(|range| scanner::scan(data, *range))
        .collect::<Result<Vec<_>>>()?;
    merge::merge_scans(partials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_run_single_worker() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "A;1.0\nB;2.0\nA;3.0\n").unwrap();

        let config = EngineConfig::builder()
            .input(file.path())
            .workers(1usize)
            .build()
            .unwrap();
        let result = run(&config).unwrap();

        assert_eq!(result.lines(), vec!["A=1.0/2.0/3.0", "B=2.0/2.0/2.0"]);
        assert_eq!(result.bytes, 18);
        assert_eq!(result.ranges, 1);
        assert_eq!(result.report.records, 3);
    }

    #[test]
    fn test_run_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig::new(dir.path().join("nope.txt"));
        assert!(matches!(run(&config), Err(EngineError::FileOpen { .. })));
    }

    #[test]
    fn test_aggregate_zero_workers() {
        assert!(matches!(
            aggregate(b"A;1\n", 0),
            Err(EngineError::InvalidWorkerCount(0))
        ));
    }
}
