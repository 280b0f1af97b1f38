use crate::error::Result;
use crate::scanner::{PartialScan, ScanReport};
use crate::stats::StatsMap;

/// Fold any number of partial maps into one, consuming them.
///
/// The result does not depend on the order of `partials`: per key, min/max
/// are order-free and sums are exact decimals.
///
/// # Errors
///
/// [`crate::error::EngineError::SumOverflow`] if a combined sum overflows.
pub fn merge<I>(partials: I) -> Result<StatsMap>
where
    I: IntoIterator<Item = StatsMap>,
{
    let mut partials = partials.into_iter();
    // Reuse the first map as the accumulator instead of re-inserting its keys.
    let Some(mut acc) = partials.next() else {
        return Ok(StatsMap::new());
    };
    for partial in partials {
        merge_into(&mut acc, partial)?;
    }
    Ok(acc)
}

/// Merge one partial map into an existing accumulator.
///
/// # Errors
///
/// [`crate::error::EngineError::SumOverflow`] if a combined sum overflows.
pub fn merge_into(acc: &mut StatsMap, partial: StatsMap) -> Result<()> {
    for (key, stats) in partial {
        acc.absorb(key, stats)?;
    }
    Ok(())
}

/// Merge complete worker outputs, summing their reports alongside.
///
/// # Errors
///
/// Same as [`merge`].
pub fn merge_scans<I>(scans: I) -> Result<(StatsMap, ScanReport)>
where
    I: IntoIterator<Item = PartialScan>,
{
    let mut report = ScanReport::default();
    let stats = merge(scans.into_iter().map(|scan| {
        report += scan.report;
        scan.stats
    }))?;
    Ok((stats, report))
}
