//! Range scanning: record alignment, line splitting and per-key accumulation.
//!
//! A record belongs to the range that contains its first byte. Both edges of a
//! range are snapped forward to the first record start at or after them, so two
//! adjacent ranges always agree on where one ends and the next begins.

use std::ops::{AddAssign, Range};

use log::debug;

use crate::error::{EngineError, RecordError, Result};
use crate::parser;
use crate::planner::ByteRange;
use crate::stats::StatsMap;

const NEWLINE: u8 = b'\n';

/// Line-level counters for one scan (or, summed, for a whole run).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub lines: u64,
    pub records: u64,
    pub malformed: u64,
    pub invalid: u64,
}

impl ScanReport {
    pub const fn rejected(&self) -> u64 {
        self.malformed + self.invalid
    }
}

impl AddAssign for ScanReport {
    fn add_assign(&mut self, rhs: Self) {
        self.lines += rhs.lines;
        self.records += rhs.records;
        self.malformed += rhs.malformed;
        self.invalid += rhs.invalid;
    }
}

/// One worker's output: its partial map plus its counters.
#[derive(Debug, Clone, Default)]
pub struct PartialScan {
    pub stats: StatsMap,
    pub report: ScanReport,
}

/// First record start at or after `pos`.
#[inline]
fn snap_to_record_start(data: &[u8], pos: usize) -> usize {
    if pos == 0 || pos >= data.len() || data[pos - 1] == NEWLINE {
        return pos.min(data.len());
    }
    memchr::memchr(NEWLINE, &data[pos..]).map_or(data.len(), |i| pos + i + 1)
}

/// Align `range` to whole records within `data`.
///
/// # Errors
///
/// [`EngineError::InvalidRange`] if the range is reversed or runs past the end.
pub fn align(data: &[u8], range: ByteRange) -> Result<Range<usize>> {
    let size = data.len() as u64;
    if range.start > range.end || range.end > size {
        return Err(EngineError::InvalidRange {
            start: range.start,
            end: range.end,
            size,
        });
    }

    // Both bounds fit in usize: they are <= data.len().
    let start = snap_to_record_start(data, range.start as usize);
    let end = snap_to_record_start(data, range.end as usize);
    Ok(start..end.max(start))
}

/// Scan every record owned by `range` and accumulate it.
///
/// Malformed lines and unparsable values are dropped and counted in the
/// report; they never fail the scan.
///
/// # Errors
///
/// [`EngineError::InvalidRange`] for an out-of-bounds range and
/// [`EngineError::SumOverflow`] if a key's sum leaves the decimal range.
pub fn scan(data: &[u8], range: ByteRange) -> Result<PartialScan> {
    let aligned = align(data, range)?;
    let span = &data[aligned.clone()];

    let mut out = PartialScan::default();
    let mut line_start = 0;
    for nl in memchr::memchr_iter(NEWLINE, span) {
        accumulate(&span[line_start..nl], &mut out)?;
        line_start = nl + 1;
    }
    if line_start < span.len() {
        accumulate(&span[line_start..], &mut out)?;
    }

    debug!(
        "range {}..{} aligned to {}..{}: {} records, {} keys, {} rejected",
        range.start,
        range.end,
        aligned.start,
        aligned.end,
        out.report.records,
        out.stats.len(),
        out.report.rejected()
    );
    Ok(out)
}

#[inline]
fn accumulate(line: &[u8], out: &mut PartialScan) -> Result<()> {
    out.report.lines += 1;
    match parser::parse(line) {
        Ok(Some(record)) => {
            out.stats.record(record.key, record.value)?;
            out.report.records += 1;
        }
        Ok(None) => {}
        Err(RecordError::MalformedRecord) => out.report.malformed += 1,
        Err(RecordError::InvalidValue { .. }) => out.report.invalid += 1,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    const INPUT: &[u8] = b"A;1.0\nB;2.0\nA;3.0\n";

    #[test]
    fn test_align_keeps_record_starts() {
        assert_eq!(align(INPUT, ByteRange::new(0, 6)).unwrap(), 0..6);
        assert_eq!(align(INPUT, ByteRange::new(6, 18)).unwrap(), 6..18);
    }

    #[test]
    fn test_align_mid_record_moves_forward() {
        // byte 8 is inside "B;2.0"
        assert_eq!(align(INPUT, ByteRange::new(0, 8)).unwrap(), 0..12);
        assert_eq!(align(INPUT, ByteRange::new(8, 18)).unwrap(), 12..18);
    }

    #[test]
    fn test_align_range_inside_one_record_is_empty() {
        let r = align(INPUT, ByteRange::new(7, 9)).unwrap();
        assert!(r.is_empty());
    }

    #[test]
    fn test_align_without_trailing_newline() {
        let data = b"A;1\nB;2";
        assert_eq!(align(data, ByteRange::new(0, 5)).unwrap(), 0..7);
        assert!(align(data, ByteRange::new(5, 7)).unwrap().is_empty());
    }

    #[test]
    fn test_align_rejects_out_of_bounds() {
        assert!(matches!(
            align(INPUT, ByteRange::new(0, 99)),
            Err(EngineError::InvalidRange { size: 18, .. })
        ));
        assert!(align(INPUT, ByteRange::new(5, 2)).is_err());
    }

    #[test]
    fn test_straddling_record_counted_once() {
        for split in 0..=INPUT.len() as u64 {
            let left = scan(INPUT, ByteRange::new(0, split)).unwrap();
            let right = scan(INPUT, ByteRange::new(split, INPUT.len() as u64)).unwrap();
            assert_eq!(
                left.report.records + right.report.records,
                3,
                "split at {split}"
            );
        }
    }

    #[test]
    fn test_scan_accumulates() {
        let out = scan(INPUT, ByteRange::new(0, INPUT.len() as u64)).unwrap();
        let a = out.stats.get(b"A").unwrap();
        assert_eq!(a.count, 2);
        assert_eq!(a.sum, Decimal::from(4));
        assert_eq!(out.report.records, 3);
        assert_eq!(out.report.lines, 3);
    }

    #[test]
    fn test_scan_counts_rejections() {
        let data = b"A;1\ngarbage\nB;x\n\n   \nC;2";
        let out = scan(data, ByteRange::new(0, data.len() as u64)).unwrap();
        assert_eq!(out.report.records, 2);
        assert_eq!(out.report.malformed, 1);
        assert_eq!(out.report.invalid, 1);
        assert_eq!(out.report.lines, 6);
        assert_eq!(out.stats.len(), 2);
    }

    #[test]
    fn test_scan_empty_range() {
        let out = scan(b"", ByteRange::new(0, 0)).unwrap();
        assert!(out.stats.is_empty());
        assert_eq!(out.report, ScanReport::default());
    }
}
