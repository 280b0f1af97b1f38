use hashbrown::HashMap;
use rust_decimal::Decimal;

use crate::error::{EngineError, Result};

/// Running statistics for one key.
///
/// Only ever constructed from a first observation, so `count >= 1` and
/// `min <= max` hold for every live value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyStats {
    pub min: Decimal,
    pub sum: Decimal,
    pub max: Decimal,
    pub count: u64,
}

impl KeyStats {
    #[inline]
    pub const fn new(value: Decimal) -> Self {
        Self {
            min: value,
            sum: value,
            max: value,
            count: 1,
        }
    }

    /// Fold one more observation in. Returns `None` if the sum would leave
    /// the decimal range.
    #[inline]
    #[must_use]
    pub fn observe(&mut self, value: Decimal) -> Option<()> {
        self.sum = self.sum.checked_add(value)?;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.count += 1;
        Some(())
    }

    /// Combine two accumulators for the same key.
    #[must_use]
    pub fn combine(&self, other: &Self) -> Option<Self> {
        Some(Self {
            min: self.min.min(other.min),
            sum: self.sum.checked_add(other.sum)?,
            max: self.max.max(other.max),
            count: self.count + other.count,
        })
    }

    /// Exact mean, before any display rounding.
    pub fn mean(&self) -> Decimal {
        self.sum / Decimal::from(self.count)
    }
}

/// Per-key statistics owned by one scan, or the merged result of many.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsMap {
    entries: HashMap<Box<[u8]>, KeyStats>,
}

impl StatsMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observation, inserting the key on first sight.
    ///
    /// # Errors
    ///
    /// [`EngineError::SumOverflow`] if the key's running sum overflows.
    pub fn record(&mut self, key: &[u8], value: Decimal) -> Result<()> {
        // Lookup by borrowed key first so the common path does not allocate.
        if let Some(stats) = self.entries.get_mut(key) {
            return stats.observe(value).ok_or_else(|| EngineError::overflow(key));
        }
        self.entries.insert(key.into(), KeyStats::new(value));
        Ok(())
    }

    /// Fold a whole accumulator for `key` into this map, consuming it.
    ///
    /// # Errors
    ///
    /// [`EngineError::SumOverflow`] if the combined sum overflows.
    pub fn absorb(&mut self, key: Box<[u8]>, incoming: KeyStats) -> Result<()> {
        if let Some(existing) = self.entries.get_mut(&key) {
            *existing = existing
                .combine(&incoming)
                .ok_or_else(|| EngineError::overflow(&key))?;
        } else {
            self.entries.insert(key, incoming);
        }
        Ok(())
    }

    pub fn get(&self, key: &[u8]) -> Option<&KeyStats> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total observations across all keys.
    pub fn observations(&self) -> u64 {
        self.entries.values().map(|s| s.count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &KeyStats)> {
        self.entries.iter().map(|(k, v)| (k.as_ref(), v))
    }

    /// Entries in ascending bytewise key order.
    pub fn sorted(&self) -> Vec<(&[u8], &KeyStats)> {
        let mut rows: Vec<_> = self.iter().collect();
        rows.sort_unstable_by(|a, b| a.0.cmp(b.0));
        rows
    }
}

impl IntoIterator for StatsMap {
    type Item = (Box<[u8]>, KeyStats);
    type IntoIter = hashbrown::hash_map::IntoIter<Box<[u8]>, KeyStats>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
