use crate::error::{EngineError, Result};

/// Half-open byte span `[start, end)` over the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    #[inline]
    pub const fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    #[inline]
    pub const fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Split `file_size` bytes into `workers` contiguous ranges.
///
/// Every range but the last is `file_size / workers` bytes long; the last one
/// absorbs the remainder. Ranges are not record-aligned here. An empty input
/// yields no ranges at all.
///
/// # Errors
///
/// [`EngineError::InvalidWorkerCount`] when `workers == 0`.
pub fn plan(file_size: u64, workers: usize) -> Result<Vec<ByteRange>> {
    if workers == 0 {
        return Err(EngineError::InvalidWorkerCount(workers));
    }
    if file_size == 0 {
        return Ok(Vec::new());
    }

    let n = workers as u64;
    let chunk = file_size / n;
    let ranges = (0..n)
        .map(|i| {
            let start = i * chunk;
            let end = if i + 1 == n { file_size } else { start + chunk };
            ByteRange::new(start, end)
        })
        .collect();
    Ok(ranges)
}
