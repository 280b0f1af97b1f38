use rust_decimal::{Decimal, RoundingStrategy};

use crate::stats::{KeyStats, StatsMap};

/// The one rounding rule used for every printed number.
pub const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

/// Round to one decimal place with [`ROUNDING`]. Negative zero is normalised
/// to `0`.
pub fn round_tenths(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(1, ROUNDING);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

/// Rounded value with exactly one fractional digit.
///
/// The digit is written out rather than produced by `rescale`, which cannot
/// widen values whose mantissa is already near the 96-bit limit.
pub fn display_tenths(value: Decimal) -> String {
    let rounded = round_tenths(value);
    if rounded.scale() == 0 {
        format!("{rounded}.0")
    } else {
        rounded.to_string()
    }
}

/// `<key>=<min>/<mean>/<max>`
pub fn format_line(key: &[u8], stats: &KeyStats) -> String {
    format!(
        "{}={}/{}/{}",
        String::from_utf8_lossy(key),
        display_tenths(stats.min),
        display_tenths(stats.mean()),
        display_tenths(stats.max)
    )
}

/// One line per key, ascending bytewise key order.
pub fn format(map: &StatsMap) -> Vec<String> {
    map.sorted()
        .into_iter()
        .map(|(key, stats)| format_line(key, stats))
        .collect()
}

/// All lines, each terminated by `\n`. Empty for an empty map.
pub fn render(map: &StatsMap) -> String {
    let mut out = String::new();
    for line in format(map) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn tenths(s: &str) -> String {
        display_tenths(dec(s))
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(tenths("5.05"), "5.1");
        assert_eq!(tenths("-5.05"), "-5.1");
        assert_eq!(tenths("5.04"), "5.0");
        assert_eq!(tenths("0.25"), "0.3");
        assert_eq!(tenths("2.449999"), "2.4");
    }

    #[test]
    fn test_always_one_fractional_digit() {
        assert_eq!(tenths("2"), "2.0");
        assert_eq!(tenths("-7"), "-7.0");
        assert_eq!(tenths("12.30"), "12.3");
    }

    #[test]
    fn test_fractional_digit_at_decimal_limits() {
        assert_eq!(display_tenths(Decimal::MAX), "79228162514264337593543950335.0");
        assert_eq!(display_tenths(Decimal::MIN), "-79228162514264337593543950335.0");
        assert_eq!(tenths("9000000000000000000000000000"), "9000000000000000000000000000.0");
    }

    #[test]
    fn test_huge_value_line() {
        let mut map = StatsMap::new();
        map.record(b"K", dec("9000000000000000000000000000")).unwrap();
        let big = "9000000000000000000000000000.0";
        assert_eq!(format(&map), vec![format!("K={big}/{big}/{big}")]);
    }

    #[test]
    fn test_negative_zero_is_normalised() {
        assert_eq!(tenths("-0.04"), "0.0");
        assert_eq!(tenths("-0.0"), "0.0");
    }

    #[test]
    fn test_format_sorted_lines() {
        let mut map = StatsMap::new();
        for (k, v) in [("B", "2.0"), ("A", "1.0"), ("A", "3.0")] {
            map.record(k.as_bytes(), dec(v)).unwrap();
        }
        assert_eq!(format(&map), vec!["A=1.0/2.0/3.0", "B=2.0/2.0/2.0"]);
        assert_eq!(render(&map), "A=1.0/2.0/3.0\nB=2.0/2.0/2.0\n");
    }

    #[test]
    fn test_mean_is_rounded_from_exact_sum() {
        let mut map = StatsMap::new();
        // mean = 0.15 exactly; binary floats would land on 0.1499999...
        for v in ["0.1", "0.2"] {
            map.record(b"k", dec(v)).unwrap();
        }
        assert_eq!(format(&map), vec!["k=0.1/0.2/0.2"]);
    }

    #[test]
    fn test_render_empty_map() {
        assert_eq!(render(&StatsMap::new()), "");
        assert!(format(&StatsMap::new()).is_empty());
    }
}
